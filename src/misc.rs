fn strip_prefix_token_untrimmed<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
}
/// Strips `search` when it is a whole leading word of `src`, returning the
/// rest with leading whitespace removed.
pub fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    strip_prefix_token_untrimmed(src, search).map(<str>::trim_start)
}
#[cfg(test)]
mod test {
    use crate::misc::strip_prefix_token;

    #[test]
    fn whole_words_only() {
        assert_eq!(strip_prefix_token("view  black", "view"), Some("black"));
        assert_eq!(strip_prefix_token("view", "view"), Some(""));
        assert_eq!(strip_prefix_token("viewer", "view"), None);
        assert_eq!(strip_prefix_token("import 8/8", "view"), None);
    }
}
