//! Tests for the line tokenizer.

use super::defaults;
use super::token::{MalformedQuote, Syntax, next_token, tokenize};

fn tokens(line: &str) -> Result<Vec<&str>, MalformedQuote> {
    tokenize(line, Syntax::default(), defaults::MAX_TOKENS)
}

mod next_token {
    use super::*;

    const DELIMS: &str = " \t";
    const QUOTES: &str = "\"'";

    #[test]
    fn skips_leading_delimiters_and_advances() {
        let mut cursor = "  \tname value";

        let token = next_token(&mut cursor, DELIMS, QUOTES, None).unwrap();

        assert_eq!(token, Some("name"));
        assert_eq!(cursor, " value");
    }

    #[test]
    fn end_of_line_is_not_an_error() {
        let mut cursor = "   ";
        assert_eq!(next_token(&mut cursor, DELIMS, QUOTES, None), Ok(None));
    }

    #[test]
    fn comment_ends_line_when_requested() {
        let mut cursor = "  # a comment";
        assert_eq!(next_token(&mut cursor, DELIMS, QUOTES, Some("#")), Ok(None));
    }

    #[test]
    fn comment_char_is_literal_without_comment_set() {
        let mut cursor = "#literal rest";
        assert_eq!(
            next_token(&mut cursor, DELIMS, QUOTES, None),
            Ok(Some("#literal"))
        );
    }

    #[test]
    fn quoted_token_keeps_delimiters() {
        let mut cursor = "\"a b\tc\" next";

        let token = next_token(&mut cursor, DELIMS, QUOTES, None).unwrap();

        assert_eq!(token, Some("a b\tc"));
        assert_eq!(cursor, " next");
    }

    #[test]
    fn quote_must_match_opening_char() {
        let mut cursor = "'say \"hi\"'";
        assert_eq!(
            next_token(&mut cursor, DELIMS, QUOTES, None),
            Ok(Some("say \"hi\""))
        );
    }

    #[test]
    fn empty_quotes_yield_empty_token() {
        let mut cursor = "\"\"";
        assert_eq!(next_token(&mut cursor, DELIMS, QUOTES, None), Ok(Some("")));
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let mut cursor = "\"never closed";
        assert_eq!(
            next_token(&mut cursor, DELIMS, QUOTES, None),
            Err(MalformedQuote)
        );
    }

    #[test]
    fn character_after_closing_quote_is_malformed() {
        let mut cursor = "\"a\"b";
        assert_eq!(
            next_token(&mut cursor, DELIMS, QUOTES, None),
            Err(MalformedQuote)
        );
    }

    #[test]
    fn quote_inside_unquoted_token_is_literal() {
        let mut cursor = "it's fine";
        assert_eq!(
            next_token(&mut cursor, DELIMS, QUOTES, None),
            Ok(Some("it's"))
        );
    }
}

mod tokenize {
    use super::*;

    #[test]
    fn splits_on_spaces_and_tabs() {
        assert_eq!(tokens("name\t value").unwrap(), ["name", "value"]);
    }

    #[test]
    fn strips_line_terminators() {
        assert_eq!(tokens("name value\r\n").unwrap(), ["name", "value"]);
    }

    #[test]
    fn quoted_value_round_trips_content() {
        assert_eq!(tokens("opt \"a b c\"").unwrap(), ["opt", "a b c"]);
    }

    #[test]
    fn rejects_text_glued_to_closing_quote() {
        assert_eq!(tokens("opt \"a\"b"), Err(MalformedQuote));
    }

    #[test]
    fn comment_line_has_no_tokens() {
        assert!(tokens("# opt value").unwrap().is_empty());
        assert!(tokens("   #opt value").unwrap().is_empty());
    }

    #[test]
    fn hash_after_first_token_is_literal() {
        assert_eq!(tokens("color #ff0000").unwrap(), ["color", "#ff0000"]);
    }

    #[test]
    fn stops_after_three_tokens() {
        assert_eq!(
            tokens("opt = value trailing \"unclosed").unwrap(),
            ["opt", "=", "value"]
        );
    }

    #[test]
    fn blank_line_has_no_tokens() {
        assert!(tokens("").unwrap().is_empty());
        assert!(tokens(" \t ").unwrap().is_empty());
    }
}
