//! Server-rendered HTML for the portfolio pages.

use crate::catalog::{RepoQuery, SortMode};
use crate::contact::{contact_entries, external_href, twitter_href, ContactOutput};
use crate::date::format_timestamp;
use crate::language::language_color;
use crate::models::{PinnedRepository, ProfileBundle, Repository, User};
use crate::view::ViewState;
use pulldown_cmark::{html::push_html, CowStr, Event, Parser, Tag, TagEnd};
use url::form_urlencoded;

/// Topics shown on a card before collapsing into "+N more".
const VISIBLE_TOPICS: usize = 3;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn encode_query(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn is_script_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

/// Render README markdown as HTML.
///
/// Raw HTML in the source is emitted as text, script URLs are blanked and
/// links open in a new tab.
pub fn render_markdown(markdown: &str) -> String {
    let events = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { dest_url, .. }) => {
            let href = if is_script_url(&dest_url) { "" } else { &*dest_url };
            Event::Html(CowStr::from(format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                escape(href)
            )))
        }
        Event::End(TagEnd::Link) => Event::Html(CowStr::Borrowed("</a>")),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        other => other,
    });

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut rendered, events);
    rendered
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
</head>
<body>
{}
</body>
</html>
"#,
        escape(title),
        body
    )
}

fn navigation(username: &str) -> String {
    let user = escape(username);
    format!(
        r#"<nav class="navigation">
<a href="/" title="Back to Home">Home</a>
<a href="/{user}">Profile</a>
<a href="/{user}/projects">Projects</a>
<a href="/{user}/contact">Contact</a>
</nav>"#
    )
}

fn loading(message: &str) -> String {
    format!(
        r#"<div class="loading" role="status"><p>{}</p></div>"#,
        escape(message)
    )
}

fn error_state(title: &str, message: &str, retry_href: &str, retry_label: &str) -> String {
    format!(
        r#"<div class="error-state" role="alert">
<h1>{}</h1>
<p>{}</p>
<a class="retry" href="{}">{}</a>
<a class="home" href="/">Back to Home</a>
</div>"#,
        escape(title),
        escape(message),
        escape(retry_href),
        escape(retry_label)
    )
}

pub fn landing_page(submitted: &str, error: Option<&str>) -> String {
    let mut body = String::from(
        r#"<main class="landing">
<h1>{ Gitfolio }</h1>
<h2>Beautiful Developer Portfolio</h2>
<p>From GitHub to Gorgeous. Instantly.</p>
"#,
    );

    body.push_str(&format!(
        r#"<form method="get" action="/">
<input type="text" name="username" placeholder="Enter GitHub username" value="{}">
<button type="submit">Create My Portfolio</button>
</form>
"#,
        escape(submitted)
    ));

    if let Some(message) = error {
        body.push_str(&format!(
            "<p class=\"form-error\" role=\"alert\">{}</p>\n",
            escape(message)
        ));
    }

    body.push_str(
        r#"<a class="demo" href="/octocat">Try the demo with @octocat</a>
<section class="features">
<article><h3>Instant Portfolio</h3><p>Transform any GitHub profile into a portfolio in seconds. No setup required.</p></article>
<article><h3>Showcase Projects</h3><p>Automatically fetch and display your best repositories with live stats.</p></article>
<article><h3>Shareable Link</h3><p>Get a shareable URL to showcase your work to employers and collaborators.</p></article>
</section>
</main>"#,
    );

    layout("Gitfolio", &body)
}

fn repo_card(card: &PinnedRepository) -> String {
    let repo = &card.repo;
    let mut html = String::from("<article class=\"project-card\">\n");

    html.push_str(&format!("<h3>{}</h3>\n", escape(&repo.name)));
    if card.is_pinned {
        html.push_str("<span class=\"badge\">PINNED</span>\n");
    }
    if let Some(description) = &repo.description {
        html.push_str(&format!("<p>{}</p>\n", escape(description)));
    }

    if !repo.topics.is_empty() {
        html.push_str("<ul class=\"topics\">");
        for topic in repo.topics.iter().take(VISIBLE_TOPICS) {
            html.push_str(&format!("<li>{}</li>", escape(topic)));
        }
        if repo.topics.len() > VISIBLE_TOPICS {
            html.push_str(&format!(
                "<li>+{} more</li>",
                repo.topics.len() - VISIBLE_TOPICS
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<div class=\"stats\">");
    if let Some(language) = &repo.language {
        html.push_str(&format!(
            "<span class=\"language\"><span class=\"dot\" style=\"background-color: {}\"></span>{}</span>",
            language_color(Some(language.as_str())),
            escape(language)
        ));
    }
    if repo.stargazers_count > 0 {
        html.push_str(&format!("<span class=\"stars\">★ {}</span>", repo.stargazers_count));
    }
    if repo.forks_count > 0 {
        html.push_str(&format!("<span class=\"forks\">⑂ {}</span>", repo.forks_count));
    }
    html.push_str(&format!(
        "<time datetime=\"{}\">{}</time>",
        repo.updated_at.to_rfc3339(),
        format_timestamp(&repo.updated_at)
    ));
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View Code</a>\n",
        escape(&repo.html_url)
    ));
    if let Some(homepage) = repo.homepage.as_deref().filter(|h| !h.is_empty()) {
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Live Demo</a>\n",
            escape(&external_href(homepage))
        ));
    }

    html.push_str("</article>\n");
    html
}

fn project_grid(title: &str, cards: &[PinnedRepository]) -> String {
    let mut html = format!("<section class=\"projects\">\n<h2>{}</h2>\n", escape(title));
    for card in cards {
        html.push_str(&repo_card(card));
    }
    html.push_str("</section>\n");
    html
}

fn profile_section(user: &User, readme: Option<&str>) -> String {
    let mut html = String::from("<section class=\"profile\">\n");

    html.push_str(&format!(
        "<img class=\"avatar\" src=\"{}\" alt=\"{}'s avatar\">\n<h1>{}</h1>\n",
        escape(&user.avatar_url),
        escape(user.display_name()),
        escape(user.display_name())
    ));
    if let Some(bio) = &user.bio {
        html.push_str(&format!("<p class=\"bio\">{}</p>\n", escape(bio)));
    }

    html.push_str(&format!(
        "<ul class=\"stats\"><li>{} repos</li><li>{} followers</li><li>{} following</li></ul>\n",
        user.public_repos, user.followers, user.following
    ));

    if let Some(location) = &user.location {
        html.push_str(&format!("<p class=\"location\">{}</p>\n", escape(location)));
    }
    if let Some(company) = &user.company {
        html.push_str(&format!("<p class=\"company\">{}</p>\n", escape(company)));
    }

    html.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View GitHub Profile</a>\n",
        escape(&user.html_url)
    ));
    if let Some(blog) = user.blog.as_deref().filter(|b| !b.is_empty()) {
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Website</a>\n",
            escape(&external_href(blog))
        ));
    }
    if let Some(handle) = &user.twitter_username {
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">@{}</a>\n",
            escape(&twitter_href(handle)),
            escape(handle)
        ));
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"about\">\n<h2>About Me</h2>\n");
    match readme {
        Some(readme) => html.push_str(&format!(
            "<span class=\"badge\">from README</span>\n<div class=\"readme\">\n{}</div>\n",
            render_markdown(readme)
        )),
        None => html.push_str(&format!(
            "<div class=\"readme-empty\"><p>No README found for @{}</p><p>Create a repository named \"{}\" with a README.md file to showcase your story here.</p></div>\n",
            escape(&user.login),
            escape(&user.login)
        )),
    }
    html.push_str("</section>\n");

    html
}

pub fn profile_page(username: &str, state: &ViewState<ProfileBundle>) -> String {
    let body = match state {
        ViewState::Loading => loading("Fetching GitHub data..."),
        ViewState::Failed(message) => error_state(
            "User Not Found",
            message,
            &format!("/{}", username),
            "Try Again",
        ),
        ViewState::Loaded(bundle) => {
            let mut html = navigation(username);
            html.push_str("\n<main>\n");
            html.push_str(&profile_section(&bundle.user, bundle.readme.as_deref()));
            if !bundle.pinned.is_empty() {
                html.push_str(&project_grid("Pinned Projects", &bundle.pinned));
            }
            html.push_str(&format!(
                "<div class=\"actions\"><a href=\"/{user}/projects\">View All Projects</a><a href=\"/{user}/contact\">Contact Info</a></div>\n</main>",
                user = escape(username)
            ));
            html
        }
    };

    layout(&format!("{} | Gitfolio", username), &body)
}

fn search_controls(username: &str, query: &RepoQuery) -> String {
    let active = query.sort_mode();
    let mut html = format!(
        r#"<form class="search" method="get" action="/{}/projects">
<input type="search" name="q" placeholder="Search repositories..." value="{}">
<input type="hidden" name="sort" value="{}">
</form>
<div class="sort">"#,
        escape(username),
        escape(&query.q),
        active.as_str()
    );

    for mode in SortMode::ALL {
        let class = if mode == active { "active" } else { "" };
        let mut href = format!("/{}/projects?sort={}", escape(username), mode.as_str());
        if !query.q.is_empty() {
            href.push_str("&amp;q=");
            href.push_str(&encode_query(&query.q));
        }
        html.push_str(&format!(
            "<a class=\"{}\" href=\"{}\">{}</a>",
            class,
            href,
            mode.label()
        ));
    }
    html.push_str("</div>\n");
    html
}

pub fn projects_page(
    username: &str,
    state: &ViewState<Vec<Repository>>,
    query: &RepoQuery,
) -> String {
    let mut body = navigation(username);
    body.push('\n');

    match state {
        ViewState::Loading => body.push_str(&loading("Loading repositories...")),
        ViewState::Failed(message) => body.push_str(&error_state(
            "Failed to load repositories",
            message,
            &format!("/{}/projects", username),
            "Try Again",
        )),
        ViewState::Loaded(repos) => {
            let visible = query.apply(repos);

            body.push_str(&format!(
                "<main>\n<h1>All Projects</h1>\n<p>Explore all {} repositories from @{}</p>\n",
                repos.len(),
                escape(username)
            ));
            body.push_str(&search_controls(username, query));

            if !query.q.is_empty() {
                body.push_str(&format!(
                    "<p class=\"summary\">Found {} repositories matching \"{}\"</p>\n",
                    visible.len(),
                    escape(&query.q)
                ));
            }

            if visible.is_empty() {
                body.push_str("<div class=\"empty\">\n<p>No repositories found</p>\n");
                if query.q.is_empty() {
                    body.push_str("<p>This user has no public repositories</p>\n");
                } else {
                    body.push_str(&format!(
                        "<p>No repositories match \"{}\"</p>\n<a href=\"/{}/projects?sort={}\">Clear search</a>\n",
                        escape(&query.q),
                        escape(username),
                        query.sort_mode().as_str()
                    ));
                }
                body.push_str("</div>\n");
            } else {
                let cards: Vec<PinnedRepository> =
                    visible.into_iter().map(PinnedRepository::unpinned).collect();
                body.push_str(&project_grid("Repositories", &cards));
            }
            body.push_str("</main>");
        }
    }

    layout(&format!("{} projects | Gitfolio", username), &body)
}

pub fn contact_page(username: &str, state: &ViewState<User>) -> String {
    let mut body = navigation(username);
    body.push('\n');

    match state {
        ViewState::Loading => body.push_str(&loading("Loading contact info...")),
        ViewState::Failed(message) => body.push_str(&error_state(
            "User Not Found",
            message,
            &format!("/{}/contact", username),
            "Try Again",
        )),
        ViewState::Loaded(user) => {
            body.push_str(&format!(
                "<main>\n<h1>Get In Touch</h1>\n<p>Connect with @{} through various channels</p>\n<div class=\"terminal\">\n",
                escape(username)
            ));
            for entry in contact_entries(user) {
                body.push_str(&format!(
                    "<div class=\"command\"><p><span class=\"prompt\">$</span> {} <span class=\"comment\"># {}</span></p>\n",
                    escape(entry.command),
                    escape(entry.description)
                ));
                match entry.output {
                    ContactOutput::Line(line) => {
                        body.push_str(&format!("<pre>{}</pre>\n", escape(&line)));
                    }
                    ContactOutput::Lines(lines) => {
                        body.push_str("<ul>");
                        for line in lines {
                            body.push_str(&format!("<li>{}</li>", escape(&line)));
                        }
                        body.push_str("</ul>\n");
                    }
                    stats @ ContactOutput::Stats { .. } => {
                        let json = serde_json::to_string_pretty(&stats).unwrap_or_default();
                        body.push_str(&format!("<pre>{}</pre>\n", escape(&json)));
                    }
                }
                body.push_str("</div>\n");
            }
            body.push_str("</div>\n</main>");
        }
    }

    layout(&format!("Contact {} | Gitfolio", username), &body)
}

pub fn not_found_page(path: &str) -> String {
    let body = format!(
        "<main class=\"not-found\">\n<h1>404</h1>\n<p>Page not found: {}</p>\n<a href=\"/\">Return to Home</a>\n</main>",
        escape(path)
    );
    layout("Page not found | Gitfolio", &body)
}
