use crate::models::User;
use serde::Serialize;

/// One command/output pair on the contact page's terminal card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactEntry {
    pub command: &'static str,
    pub description: &'static str,
    pub output: ContactOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContactOutput {
    Line(String),
    Lines(Vec<String>),
    Stats {
        public_repos: u32,
        followers: u32,
        following: u32,
    },
}

pub fn contact_entries(user: &User) -> Vec<ContactEntry> {
    let mut social = Vec::new();
    if let Some(blog) = non_blank(user.blog.as_deref()) {
        social.push(format!("website: {}", blog));
    }
    if let Some(handle) = non_blank(user.twitter_username.as_deref()) {
        social.push(format!("twitter: @{}", handle));
    }
    social.push(format!("github: {}", user.html_url));

    vec![
        ContactEntry {
            command: "whoami",
            description: "Full name",
            output: ContactOutput::Line(user.display_name().to_string()),
        },
        ContactEntry {
            command: "pwd",
            description: "Current location",
            output: ContactOutput::Line(
                non_blank(user.location.as_deref()).unwrap_or("Earth").to_string(),
            ),
        },
        ContactEntry {
            command: "cat bio.txt",
            description: "About me",
            output: ContactOutput::Line(
                non_blank(user.bio.as_deref())
                    .unwrap_or("No bio available")
                    .to_string(),
            ),
        },
        ContactEntry {
            command: "ls -la social/",
            description: "Social links",
            output: ContactOutput::Lines(social),
        },
        ContactEntry {
            command: "cat stats.json",
            description: "GitHub stats",
            output: ContactOutput::Stats {
                public_repos: user.public_repos,
                followers: user.followers,
                following: user.following,
            },
        },
    ]
}

/// Link target for a blog or homepage field, which is often stored without a scheme.
pub fn external_href(link: &str) -> String {
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("https://{}", link)
    }
}

pub fn twitter_href(handle: &str) -> String {
    format!("https://twitter.com/{}", handle)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
