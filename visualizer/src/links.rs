use std::io;
use travelmapcore::map::TOKEN_HELP_URL;

/// Opens the token-issuing page in the system browser.
pub fn open_token_page() -> bool {
    open_with(TOKEN_HELP_URL, |url| open::that_detached(url))
}

/// Hands `url` to `opener`. A failure is logged and reported as `false`.
pub fn open_with<F>(url: &str, opener: F) -> bool
where
    F: FnOnce(&str) -> io::Result<()>,
{
    match opener(url) {
        Ok(()) => {
            log::info!("opened {url}");
            true
        }
        Err(err) => {
            log::warn!("could not open {url}: {err}");
            false
        }
    }
}
