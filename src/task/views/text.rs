//! Plain-text extraction for rich-text descriptions.

/// Block-level tags whose boundaries separate words.
const BLOCK_TAGS: [&str; 17] = [
    "p", "br", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
    "tr", "td", "hr",
];

/// Strips markup tags from `description` and decodes the common HTML
/// entities.
///
/// A `<` only opens a tag when followed by a letter, `/` or `!`; anything
/// else is literal text. Inline tags vanish without a trace so the words
/// they wrap stay joined, while block tags leave a word break. Whitespace
/// runs collapse to a single space.
///
/// # Examples
///
/// ```
/// use eisenhower::task::views::plain_text;
///
/// assert_eq!(
///     plain_text("<p>Fish &amp; <b>chips</b></p>"),
///     "Fish & chips"
/// );
/// assert_eq!(plain_text("<b>Q</b>3 costs < 5k"), "Q3 costs < 5k");
/// ```
#[must_use]
pub fn plain_text(description: &str) -> String {
    let mut stripped = String::with_capacity(description.len());
    let mut chars = description.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '<' && chars.peek().is_some_and(|next| opens_tag(*next)) {
            let mut tag = String::new();
            for inner in chars.by_ref() {
                if inner == '>' {
                    break;
                }
                tag.push(inner);
            }
            if is_block_tag(&tag) {
                stripped.push(' ');
            }
        } else {
            stripped.push(ch);
        }
    }
    let decoded = decode_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

const fn opens_tag(next: char) -> bool {
    next.is_ascii_alphabetic() || matches!(next, '/' | '!')
}

fn is_block_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

fn decode_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 6] = [
        ("&nbsp;", " "),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&amp;", "&"),
    ];
    ENTITIES
        .iter()
        .fold(text.to_owned(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}
