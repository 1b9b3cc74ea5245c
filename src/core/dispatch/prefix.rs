use regex::Regex;

/// Recognises the configured text prefix or a mention of the bot at the start
/// of a message, case-insensitively, together with any whitespace after it.
pub struct PrefixMatcher {
    pattern: Regex,
}

/// A message with its prefix stripped and split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInvocation {
    /// Lower-cased command name; empty when nothing followed the prefix.
    pub name: String,
    pub args: Vec<String>,
    pub by_mention: bool,
}

impl PrefixMatcher {
    pub fn new(prefix: &str, bot_id: u64) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"(?i)^(<@!?{bot_id}>|{})\s*",
            regex::escape(prefix)
        ))?;
        Ok(Self { pattern })
    }

    /// `None` when the message does not start with the prefix or a mention.
    pub fn parse(&self, content: &str) -> Option<ParsedInvocation> {
        let captures = self.pattern.captures(content)?;
        let whole = captures.get(0)?;
        let by_mention = captures
            .get(1)
            .is_some_and(|prefix| prefix.as_str().starts_with("<@"));

        let mut words = content[whole.end()..].split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let args = words.map(str::to_string).collect();

        Some(ParsedInvocation {
            name,
            args,
            by_mention,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: u64 = 42;

    fn matcher(prefix: &str) -> PrefixMatcher {
        PrefixMatcher::new(prefix, BOT).unwrap()
    }

    #[test]
    fn strips_prefix_and_splits_on_whitespace_runs() {
        let parsed = matcher("!").parse("!Say   Hello \t World").unwrap();
        assert_eq!(parsed.name, "say");
        assert_eq!(parsed.args, ["Hello", "World"]);
        assert!(!parsed.by_mention);
    }

    #[test]
    fn prefix_is_case_insensitive() {
        let parsed = matcher("bot.").parse("BOT.ping").unwrap();
        assert_eq!(parsed.name, "ping");
    }

    #[test]
    fn mentions_work_with_and_without_nickname_marker() {
        for content in ["<@42> ping", "<@!42>ping", "<@42>   PING now"] {
            let parsed = matcher("!").parse(content).unwrap();
            assert_eq!(parsed.name, "ping");
            assert!(parsed.by_mention);
        }
        assert!(matcher("!").parse("<@43> ping").is_none());
    }

    #[test]
    fn regex_metacharacters_in_prefix_are_literal() {
        let matcher = matcher("?.");
        assert_eq!(matcher.parse("?.help").unwrap().name, "help");
        assert!(matcher.parse("x.help").is_none());
        assert!(matcher.parse(".help").is_none());
    }

    #[test]
    fn prefix_must_be_at_the_start() {
        assert!(matcher("!").parse("hey !ping").is_none());
        assert!(matcher("!").parse("ping").is_none());
    }

    #[test]
    fn bare_prefix_yields_empty_name() {
        let parsed = matcher("!").parse("!   ").unwrap();
        assert!(parsed.name.is_empty());
        assert!(parsed.args.is_empty());

        assert!(matcher("!").parse("<@42>").unwrap().by_mention);
    }
}
