//! Text cleanup helpers shared by the platform extractors

use scraper::ElementRef;

/// Collapses all whitespace runs into single spaces and trims the ends
pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derives author initials from a username
///
/// A single word yields its first letter; multiple words yield the first
/// letter of each, all uppercased. Empty or whitespace-only input yields
/// `None`.
pub(crate) fn author_initials(username: &str) -> Option<String> {
    let cleaned = username.trim();
    if cleaned.is_empty() {
        return None;
    }

    let words: Vec<&str> = cleaned.split_whitespace().collect();

    if words.len() == 1 {
        return cleaned
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string());
    }

    let initials: String = words
        .iter()
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect();

    if initials.is_empty() {
        None
    } else {
        Some(initials)
    }
}

/// Finds the text of the closest preceding element carrying `class_name`
///
/// Walks previous siblings of the element (and of each ancestor in turn),
/// searching each sibling's subtree. This mirrors how author bylines sit
/// just before the content block in the supported platforms' markup.
pub(crate) fn preceding_class_text(element: ElementRef<'_>, class_name: &str) -> Option<String> {
    let mut anchor = *element;

    loop {
        for sibling in anchor.prev_siblings() {
            let found = sibling
                .descendants()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().classes().any(|c| c == class_name));

            if let Some(found) = found {
                let text = clean_text(&found.text().collect::<String>());
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }

        match anchor.parent() {
            Some(parent) => anchor = parent,
            None => return None,
        }
    }
}
