//! Tokenization of script lines and command arguments.
//!
//! There is no grammar beyond "the first space separates the command from its
//! argument". Commands split their own argument with the helpers below.

/// Comment marker; a line whose first non-blank character is `#` is ignored.
pub const COMMENT: char = '#';

/// Separator between instructions given inline with `--drun`.
pub const INLINE_SEPARATOR: char = ';';

/// A classified script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Instruction { command: &'a str, argument: &'a str },
}

/// Classify one script line. Surrounding whitespace is stripped first.
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        Line::Blank
    } else if line.starts_with(COMMENT) {
        Line::Comment
    } else {
        let (command, argument) = split_instruction(line);
        Line::Instruction { command, argument }
    }
}

/// Split at the first space. The argument is the verbatim remainder, or empty
/// when there is no space.
pub fn split_instruction(text: &str) -> (&str, &str) {
    text.split_once(' ').unwrap_or((text, ""))
}

/// Instructions of an inline program, in order, each with surrounding
/// whitespace removed. Empty segments are kept.
pub fn split_inline(code: &str) -> impl Iterator<Item = &str> {
    code.split(INLINE_SEPARATOR).map(str::trim)
}

/// Split off the first word of an argument: `"name rest of text"` gives
/// `("name", "rest of text")`. Leading blanks before the word are skipped;
/// the remainder after the single separating space is kept verbatim.
pub fn split_first_word(argument: &str) -> (&str, &str) {
    let argument = argument.trim_start();
    match argument.find(char::is_whitespace) {
        Some(i) => {
            let sep = argument[i..].chars().next().map_or(1, char::len_utf8);
            (&argument[..i], &argument[i + sep..])
        }
        None => (argument, ""),
    }
}

/// Whitespace-separated words of an argument.
pub fn words(argument: &str) -> Vec<&str> {
    argument.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t "), Line::Blank);
        assert_eq!(classify("# a comment"), Line::Comment);
        assert_eq!(classify("   #indented comment"), Line::Comment);
    }

    #[test]
    fn test_instruction_split_at_first_space() {
        assert_eq!(
            classify("io.write hello   big world"),
            Line::Instruction {
                command: "io.write",
                argument: "hello   big world"
            }
        );
        assert_eq!(
            classify("  io.clear  "),
            Line::Instruction {
                command: "io.clear",
                argument: ""
            }
        );
    }

    #[test]
    fn test_hash_inside_argument_is_not_a_comment() {
        assert_eq!(
            classify("io.write #1 fan"),
            Line::Instruction {
                command: "io.write",
                argument: "#1 fan"
            }
        );
    }

    #[test]
    fn test_split_inline_keeps_empty_segments() {
        let parts: Vec<&str> = split_inline("io.local x 1; io.write $x;").collect();
        assert_eq!(parts, ["io.local x 1", "io.write $x", ""]);
    }

    #[test]
    fn test_split_first_word() {
        assert_eq!(split_first_word("name hello  world"), ("name", "hello  world"));
        assert_eq!(split_first_word("  name"), ("name", ""));
        assert_eq!(split_first_word(""), ("", ""));
    }

    #[test]
    fn test_words() {
        assert_eq!(words(" 2  3 z "), ["2", "3", "z"]);
        assert!(words("").is_empty());
    }
}
