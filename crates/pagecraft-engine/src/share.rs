//! Outbound share links.
//!
//! Sharing only needs a page title and url; it never touches the editor.

use urlencoding::encode;

/// Length of the id in a generated public link
pub const PUBLIC_ID_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    WhatsApp,
    Facebook,
    Twitter,
    LinkedIn,
    Email,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 5] = [
        ShareTarget::WhatsApp,
        ShareTarget::Facebook,
        ShareTarget::Twitter,
        ShareTarget::LinkedIn,
        ShareTarget::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShareTarget::WhatsApp => "WhatsApp",
            ShareTarget::Facebook => "Facebook",
            ShareTarget::Twitter => "Twitter",
            ShareTarget::LinkedIn => "LinkedIn",
            ShareTarget::Email => "Email",
        }
    }
}

/// Build the url that shares `page_url` titled `title` on `target`
pub fn share_url(target: ShareTarget, title: &str, page_url: &str) -> String {
    let url = encode(page_url);
    match target {
        ShareTarget::WhatsApp => {
            format!("https://wa.me/?text={}{url}", encode(&format!("{title}: ")))
        }
        ShareTarget::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        ShareTarget::Twitter => format!(
            "https://twitter.com/intent/tweet?url={url}&text={}",
            encode(title)
        ),
        ShareTarget::LinkedIn => {
            format!("https://www.linkedin.com/sharing/share-offsite/?url={url}")
        }
        ShareTarget::Email => format!(
            "mailto:?subject={}&body={}",
            encode(title),
            encode(&format!("Check out this page: {title}\n{page_url}"))
        ),
    }
}

/// Read-only public link to a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicLink {
    pub id: String,
    pub url: String,
}

impl PublicLink {
    /// Generate a link with a random 8 character lowercase alphanumeric id
    pub fn generate(base_url: &str) -> Self {
        let id: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(PUBLIC_ID_LEN)
            .collect();
        Self::with_id(base_url, id)
    }

    pub fn with_id(base_url: &str, id: impl Into<String>) -> Self {
        let id = id.into();
        let url = format!("{}/{id}", base_url.trim_end_matches('/'));
        Self { id, url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const PAGE: &str = "https://pagecraft.example/workspace/page-1";

    #[rstest]
    #[case(
        ShareTarget::WhatsApp,
        "https://wa.me/?text=Project%20Roadmap%3A%20https%3A%2F%2Fpagecraft.example%2Fworkspace%2Fpage-1"
    )]
    #[case(
        ShareTarget::Facebook,
        "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fpagecraft.example%2Fworkspace%2Fpage-1"
    )]
    #[case(
        ShareTarget::Twitter,
        "https://twitter.com/intent/tweet?url=https%3A%2F%2Fpagecraft.example%2Fworkspace%2Fpage-1&text=Project%20Roadmap"
    )]
    #[case(
        ShareTarget::LinkedIn,
        "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fpagecraft.example%2Fworkspace%2Fpage-1"
    )]
    #[case(
        ShareTarget::Email,
        "mailto:?subject=Project%20Roadmap&body=Check%20out%20this%20page%3A%20Project%20Roadmap%0Ahttps%3A%2F%2Fpagecraft.example%2Fworkspace%2Fpage-1"
    )]
    fn test_share_urls(#[case] target: ShareTarget, #[case] expected: &str) {
        assert_eq!(share_url(target, "Project Roadmap", PAGE), expected);
    }

    #[test]
    fn test_title_is_encoded() {
        let url = share_url(ShareTarget::Twitter, "Ideas & Inspiration", PAGE);
        assert!(url.ends_with("&text=Ideas%20%26%20Inspiration"));
    }

    #[test]
    fn test_generated_public_link() {
        let link = PublicLink::generate("https://pagecraft.example/public/");
        assert_eq!(link.id.len(), PUBLIC_ID_LEN);
        assert!(
            link.id
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
        assert_eq!(
            link.url,
            format!("https://pagecraft.example/public/{}", link.id)
        );
    }
}
