use crate::error::{Result, UnfollowError};
use url::Url;

/// `<base_url>/<username>/`
///
/// The username is pushed as a single path segment, so `/`, `?` and `#`
/// are percent-encoded and the result always stays under `base_url`.
pub fn profile_url(base_url: &str, username: &str) -> Result<Url> {
    if matches!(username, "" | "." | "..") {
        return Err(UnfollowError::InvalidUsername {
            username: username.to_string(),
        });
    }

    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| {
            UnfollowError::configuration(format!("Profile base URL cannot have a path: {}", base_url))
        })?
        .pop_if_empty()
        .push(username)
        .push("");
    Ok(url)
}

/// Something that can show a profile page to the user.
pub trait ProfileLauncher {
    fn launch(&mut self, url: &Url) -> Result<()>;
}

/// Opens URLs with the platform's default browser.
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl ProfileLauncher for SystemBrowser {
    fn launch(&mut self, url: &Url) -> Result<()> {
        log::debug!("Opening {} in the default browser", url);
        open::that(url.as_str()).map_err(|e| UnfollowError::Browser {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url() {
        let url = profile_url("https://www.instagram.com", "alice").unwrap();
        assert_eq!(url.as_str(), "https://www.instagram.com/alice/");
    }

    #[test]
    fn test_profile_url_tolerates_trailing_slash() {
        let url = profile_url("https://www.instagram.com/", "bob.smith_").unwrap();
        assert_eq!(url.as_str(), "https://www.instagram.com/bob.smith_/");
    }

    #[test]
    fn test_username_stays_one_segment() {
        let base = "https://www.instagram.com";

        let url = profile_url(base, "a?b#c").unwrap();
        assert_eq!(url.as_str(), "https://www.instagram.com/a%3Fb%23c/");

        let url = profile_url(base, "//evil.com").unwrap();
        assert_eq!(url.host_str(), Some("www.instagram.com"));
        assert_eq!(url.path(), "/%2F%2Fevil.com/");

        for name in ["javascript:alert(1)", "mailto:x", "a/../../b", "x\\y"] {
            let url = profile_url(base, name).unwrap();
            assert_eq!(url.scheme(), "https");
            assert_eq!(url.host_str(), Some("www.instagram.com"));
            assert_eq!(url.path_segments().unwrap().count(), 2, "{}", name);
            assert!(url.as_str().ends_with('/'));
        }
    }

    #[test]
    fn test_dot_segments_rejected() {
        for name in ["", ".", ".."] {
            assert!(matches!(
                profile_url("https://www.instagram.com", name),
                Err(UnfollowError::InvalidUsername { .. })
            ));
        }
    }

    #[test]
    fn test_base_with_path() {
        let url = profile_url("https://example.org/people", "alice").unwrap();
        assert_eq!(url.as_str(), "https://example.org/people/alice/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            profile_url("not a url", "alice"),
            Err(UnfollowError::Configuration { .. })
        ));
    }
}
