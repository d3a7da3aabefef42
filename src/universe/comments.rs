/// Read-only view over the comment lines attached to a declaration or package.
///
/// Directives are lines of the form `+name<sep>value`; leading whitespace
/// before the `+` is ignored.
#[derive(Debug, Clone, Copy)]
pub struct Comments<'a> {
    lines: &'a [String],
}

impl<'a> Comments<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Comments { lines }
    }

    fn trimmed(&self) -> impl Iterator<Item = &'a str> {
        let lines: &'a [String] = self.lines;
        lines.iter().map(|l| l.trim_start())
    }

    /// Value of the first `+<name><sep>` line, e.g. `get_tag("domain", "=")`.
    pub fn get_tag(&self, name: &str, sep: &str) -> Option<&'a str> {
        self.get_tags(name, sep).into_iter().next()
    }

    /// Values of every `+<name><sep>` line, in comment order.
    pub fn get_tags(&self, name: &str, sep: &str) -> Vec<&'a str> {
        let prefix = format!("+{name}{sep}");
        self.trimmed()
            .filter_map(|l| l.strip_prefix(prefix.as_str()))
            .map(str::trim_end)
            .collect()
    }

    /// True when any line starts with `+<name>`.
    pub fn has_tag(&self, name: &str) -> bool {
        let prefix = format!("+{name}");
        self.trimmed().any(|l| l.starts_with(prefix.as_str()))
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.lines.iter().any(|l| l.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_get_tag_returns_first_match() {
        let l = lines(&[
            "Widget is a thing",
            " +subresource=request=A,path=widgets/a",
            "+subresource=request=B,path=widgets/b",
        ]);
        let c = Comments::new(&l);
        assert_eq!(c.get_tag("subresource", "="), Some("request=A,path=widgets/a"));
        assert_eq!(c.get_tags("subresource", "=").len(), 2);
        assert_eq!(c.get_tag("resource", "="), None);
    }

    #[test]
    fn test_has_tag_matches_prefix() {
        let l = lines(&["+subresource-request", "+genclient:nonNamespaced"]);
        let c = Comments::new(&l);
        assert!(c.has_tag("subresource"));
        assert!(c.has_tag("subresource-request"));
        assert!(!c.has_tag("resource"));
        assert!(c.contains("+genclient:nonNamespaced"));
    }

    #[test]
    fn test_subresource_request_is_not_a_subresource_directive() {
        let l = lines(&["+subresource-request"]);
        let c = Comments::new(&l);
        assert!(c.get_tags("subresource", "=").is_empty());
    }
}
