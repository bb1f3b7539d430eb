//! Minimal CSS rule splitting.
//!
//! This is not a conforming CSS tokenizer. It strips comments and at-rules,
//! then yields `selector { body }` pairs with their declaration lists. Rules
//! it cannot make sense of are dropped, never reported: a bad declaration must
//! not abort a whole document.

/// One `property: value` pair from a rule body or inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// One parsed rule: the comma-separated selector list and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

pub fn parse_rules(css: &str) -> Vec<CssRule> {
    let mut out = Vec::new();
    let commented = strip_comments(css);
    let source = strip_at_rules(&commented);
    for raw in source.split('}') {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let Some((selectors, body)) = trimmed.split_once('{') else {
            continue;
        };
        // Stray semicolons before the selector survive error recovery above.
        let selectors: Vec<String> = selectors
            .trim()
            .trim_start_matches(';')
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let declarations = parse_declarations(body);
        if selectors.is_empty() || declarations.is_empty() {
            continue;
        }
        out.push(CssRule {
            selectors,
            declarations,
        });
    }
    out
}

/// Parse a `;`-separated declaration list. Entries without a `:` are dropped;
/// the first `:` splits property from value; property names are lowercased.
pub fn parse_declarations(source: &str) -> Vec<Declaration> {
    source
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                property,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Inline `style="..."` attributes use the same grammar as rule bodies.
pub fn parse_inline_declarations(source: &str) -> Vec<(String, String)> {
    parse_declarations(source)
        .into_iter()
        .map(|decl| (decl.property, decl.value))
        .collect()
}

fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_comment = false;
    while let Some(ch) = chars.next() {
        if in_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_comment = false;
            }
        } else if ch == '/' && chars.peek() == Some(&'*') {
            chars.next();
            in_comment = true;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Remove every at-rule. None are supported here: `@media` and friends would
/// otherwise leak their inner rules into the plain rule stream, and statement
/// forms like `@import` would corrupt the next selector.
fn strip_at_rules(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut i = 0usize;
    let n = bytes.len();
    while i < n {
        if bytes[i] != b'@' {
            let run = i;
            while i < n && bytes[i] != b'@' {
                i += 1;
            }
            out.push_str(&source[run..i]);
            continue;
        }
        // Scan the prelude for whichever comes first: a block to skip over
        // with brace balancing, or a terminating semicolon.
        let mut j = i + 1;
        while j < n && bytes[j] != b'{' && bytes[j] != b';' {
            j += 1;
        }
        if j >= n {
            break;
        }
        if bytes[j] == b';' {
            i = j + 1;
            continue;
        }
        let mut depth = 1i32;
        j += 1;
        while j < n && depth > 0 {
            match bytes[j] {
                b'{' => depth += 1,
                b'}' => depth -= 1,
                _ => {}
            }
            j += 1;
        }
        i = j;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_rules_and_selector_lists() {
        let rules = parse_rules("p, .note { color: red; font-size: 12pt }\nb { font-weight: bold }");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selectors, vec!["p", ".note"]);
        assert_eq!(rules[0].declarations.len(), 2);
        assert_eq!(rules[1].declarations[0].property, "font-weight");
    }

    #[test]
    fn comments_are_stripped() {
        let rules = parse_rules("p { /* color: red; */ color: blue }");
        assert_eq!(rules[0].declarations.len(), 1);
        assert_eq!(rules[0].declarations[0].value, "blue");
    }

    #[test]
    fn media_blocks_are_elided_entirely() {
        let rules = parse_rules("@media print { p { color: red } } p { color: blue }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].declarations[0].value, "blue");
    }

    #[test]
    fn statement_at_rules_do_not_corrupt_the_next_selector() {
        let rules = parse_rules("@import url('x.css'); p { color: blue }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selectors, vec!["p"]);
    }

    #[test]
    fn entries_without_a_colon_are_dropped() {
        let decls = parse_declarations("color: red; bogus; font-style: italic");
        assert_eq!(decls.len(), 2);
    }

    #[test]
    fn property_names_are_lowercased_and_values_kept_verbatim() {
        let decls = parse_declarations("COLOR: Red");
        assert_eq!(decls[0].property, "color");
        assert_eq!(decls[0].value, "Red");
    }

    #[test]
    fn value_splits_on_first_colon_only() {
        let decls = parse_declarations("background: url(a:b)");
        assert_eq!(decls[0].value, "url(a:b)");
    }
}
