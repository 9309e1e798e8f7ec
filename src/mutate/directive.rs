//! Line-oriented parser for the oracle's edit plan.
//!
//! The oracle is an untrusted text producer, so the grammar is strict:
//! a `File:` marker line opens a directive and subsequent non-blank
//! lines up to the next marker form its rationale. Leading unmarked
//! text is silently dropped. A repeated path replaces the earlier
//! directive; directives have no identity beyond their file path.

/// One oracle-proposed file rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDirective {
    /// Target path, relative to the app root.
    pub file_path: String,
    /// Why the oracle wants to touch this file.
    pub rationale: String,
}

/// One classified plan line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// A `File:` marker opening a directive.
    Marker(&'a str),
    /// Rationale text belonging to the open directive.
    Body(&'a str),
    /// Blank; skipped.
    Blank,
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if let Some(path) = trimmed.strip_prefix("File:") {
        let path = path.trim();
        if !path.is_empty() {
            return Line::Marker(path);
        }
    }
    Line::Body(trimmed)
}

/// Folds plan text into an ordered directive list.
///
/// Body text before the first marker is dropped; a directive whose path
/// repeats overwrites the earlier entry in place.
#[must_use]
pub fn parse_directives(plan: &str) -> Vec<EditDirective> {
    let mut directives: Vec<EditDirective> = Vec::new();
    let mut open: Option<EditDirective> = None;

    let mut push = |directive: EditDirective, directives: &mut Vec<EditDirective>| {
        if let Some(existing) =
            directives.iter_mut().find(|d| d.file_path == directive.file_path)
        {
            *existing = directive;
        } else {
            directives.push(directive);
        }
    };

    for line in plan.lines() {
        match classify(line) {
            Line::Marker(path) => {
                if let Some(directive) = open.take() {
                    push(directive, &mut directives);
                }
                open = Some(EditDirective { file_path: path.to_string(), rationale: String::new() });
            }
            Line::Body(text) => {
                if let Some(directive) = open.as_mut() {
                    if !directive.rationale.is_empty() {
                        directive.rationale.push('\n');
                    }
                    directive.rationale.push_str(text);
                }
                // Unmarked leading text is dropped by design.
            }
            Line::Blank => {}
        }
    }
    if let Some(directive) = open.take() {
        push(directive, &mut directives);
    }

    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_marker_and_rationale_blocks() {
        let plan = "\
File: routes/users.js
Guard the user routes with requirePlatformSession.
Scope queries by ownerId.

File: models/user.js
Spread platformFields into the schema.
";
        let directives = parse_directives(plan);
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].file_path, "routes/users.js");
        assert_eq!(
            directives[0].rationale,
            "Guard the user routes with requirePlatformSession.\nScope queries by ownerId."
        );
        assert_eq!(directives[1].file_path, "models/user.js");
    }

    #[test]
    fn drops_unmarked_leading_text() {
        let plan = "\
Here is my plan for integrating the app.
I will edit two files.

File: server.js
Mount the platform session middleware.
";
        let directives = parse_directives(plan);
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].file_path, "server.js");
        assert_eq!(directives[0].rationale, "Mount the platform session middleware.");
    }

    #[test]
    fn repeated_path_overwrites_earlier_directive() {
        let plan = "\
File: server.js
First idea.
File: routes/api.js
Guard the API.
File: server.js
Better idea.
";
        let directives = parse_directives(plan);
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].file_path, "server.js");
        assert_eq!(directives[0].rationale, "Better idea.");
        assert_eq!(directives[1].file_path, "routes/api.js");
    }

    #[test]
    fn empty_or_unmarked_plan_yields_no_directives() {
        assert!(parse_directives("").is_empty());
        assert!(parse_directives("no markers anywhere\njust prose\n").is_empty());
    }

    #[test]
    fn marker_without_path_is_body_text() {
        let plan = "File:\nFile: real.js\nDo the thing.\n";
        let directives = parse_directives(plan);
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].file_path, "real.js");
    }

    #[test]
    fn blank_lines_inside_rationale_are_skipped() {
        let plan = "File: a.js\nfirst\n\nsecond\n";
        let directives = parse_directives(plan);
        assert_eq!(directives[0].rationale, "first\nsecond");
    }
}
