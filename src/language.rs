/// Color used for repositories without a known primary language.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#6b7280";

static LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("C#", "#239120"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#A97BFF"),
    ("Dart", "#00B4AB"),
    ("HTML", "#e34c26"),
    ("CSS", "#1572B6"),
    ("SCSS", "#c6538c"),
    ("Vue", "#4FC08D"),
    ("React", "#61DAFB"),
    ("Svelte", "#ff3e00"),
    ("Shell", "#89e051"),
    ("Dockerfile", "#384d54"),
    ("Jupyter Notebook", "#DA5B0B"),
];

/// Display color for a repository's primary language.
pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|name| {
            LANGUAGE_COLORS
                .iter()
                .find(|(known, _)| *known == name)
                .map(|(_, color)| *color)
        })
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}
