use anyhow::Result;
use git2::{Repository, Signature};
use issue_parser::cli::{CommitsCommand, MatcherArgs, OutputFormat};
use issue_parser::settings::Settings;
use issue_parser::{
    Base, ConfigError, InputError, Matcher, Mention, Options, ParseResult, Preset, Reference,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn parse(preset: &str, text: &str) -> ParseResult {
    Matcher::named(preset).unwrap().parse(text).unwrap()
}

fn action(raw: &str, action: &str, slug: Option<&str>, prefix: Option<&str>, issue: &str) -> Reference {
    Reference {
        raw: raw.to_string(),
        action: Some(action.to_string()),
        slug: slug.map(str::to_string),
        prefix: prefix.map(str::to_string),
        issue: issue.to_string(),
    }
}

fn reference(raw: &str, slug: Option<&str>, prefix: Option<&str>, issue: &str) -> Reference {
    Reference {
        raw: raw.to_string(),
        action: None,
        slug: slug.map(str::to_string),
        prefix: prefix.map(str::to_string),
        issue: issue.to_string(),
    }
}

fn mention(raw: &str, prefix: &str, user: &str) -> Mention {
    Mention {
        raw: raw.to_string(),
        prefix: prefix.to_string(),
        user: user.to_string(),
    }
}

fn base(value: serde_json::Value) -> Base {
    Base::from_value(&value).unwrap()
}

#[test]
fn parse_github_issue() {
    let result = parse(
        "GitHub",
        "Fix #1 reSOLved gh-2 CLOSES Gh-3 fix o/r#4 #5 o/r#6 fix https://github.com/o/r/issues/7 \
         https://github.com/o/r/issues/8 fix https://github.com/o/r/pull/9 \
         https://github.com/o/r/pull/10 fixing #11 Duplicate OF #12 @user",
    );

    assert_eq!(
        result,
        ParseResult {
            actions: vec![
                action("Fix #1", "Fix", None, Some("#"), "1"),
                action("reSOLved gh-2", "Resolved", None, Some("gh-"), "2"),
                action("CLOSES Gh-3", "Closes", None, Some("Gh-"), "3"),
                action("fix o/r#4", "Fix", Some("o/r"), Some("#"), "4"),
                action("fix https://github.com/o/r/issues/7", "Fix", Some("o/r"), None, "7"),
                action("fix https://github.com/o/r/pull/9", "Fix", Some("o/r"), None, "9"),
            ],
            refs: vec![
                reference("#5", None, Some("#"), "5"),
                reference("o/r#6", Some("o/r"), Some("#"), "6"),
                reference("https://github.com/o/r/issues/8", Some("o/r"), None, "8"),
                reference("https://github.com/o/r/pull/10", Some("o/r"), None, "10"),
                reference("#11", None, Some("#"), "11"),
            ],
            duplicates: vec![action("Duplicate OF #12", "Duplicate of", None, Some("#"), "12")],
            mentions: vec![mention("@user", "@", "user")],
            ..ParseResult::default()
        }
    );
}

#[test]
fn parse_bitbucket_issue() {
    let result = parse(
        "Bitbucket",
        "Fix #1 reSOLved #2 CLOSES #3 fix o/r#4 #5 o/r#6 fixing #7 /duplicate #8 @user",
    );

    assert_eq!(
        result,
        ParseResult {
            actions: vec![
                action("Fix #1", "Fix", None, Some("#"), "1"),
                action("reSOLved #2", "Resolved", None, Some("#"), "2"),
                action("CLOSES #3", "Closes", None, Some("#"), "3"),
                action("fix o/r#4", "Fix", Some("o/r"), Some("#"), "4"),
                action("fixing #7", "Fixing", None, Some("#"), "7"),
            ],
            refs: vec![
                reference("#5", None, Some("#"), "5"),
                reference("o/r#6", Some("o/r"), Some("#"), "6"),
                reference("#8", None, Some("#"), "8"),
            ],
            mentions: vec![mention("@user", "@", "user")],
            ..ParseResult::default()
        }
    );
}

#[test]
fn parse_gitlab_issue() {
    let result = parse(
        "GitLab",
        "Fix #1 reSOLved #2 IMPLEMENT #3 fix g/sg/o/r#4 #5 o/r#6 fix https://gitlab.com/o/r/issues/7 \
         https://gitlab.com/o/r/issues/8 fix https://gitlab.com/o/r/merge_requests/9 \
         https://gitlab.com/o/r/merge_requests/10 fixing #11 fixing !12 /duplicate #13 @user",
    );

    assert_eq!(
        result,
        ParseResult {
            actions: vec![
                action("Fix #1", "Fix", None, Some("#"), "1"),
                action("reSOLved #2", "Resolved", None, Some("#"), "2"),
                action("IMPLEMENT #3", "Implement", None, Some("#"), "3"),
                action("fix g/sg/o/r#4", "Fix", Some("g/sg/o/r"), Some("#"), "4"),
                action("fix https://gitlab.com/o/r/issues/7", "Fix", Some("o/r"), None, "7"),
                action(
                    "fix https://gitlab.com/o/r/merge_requests/9",
                    "Fix",
                    Some("o/r"),
                    None,
                    "9"
                ),
                action("fixing #11", "Fixing", None, Some("#"), "11"),
                action("fixing !12", "Fixing", None, Some("!"), "12"),
            ],
            refs: vec![
                reference("#5", None, Some("#"), "5"),
                reference("o/r#6", Some("o/r"), Some("#"), "6"),
                reference("https://gitlab.com/o/r/issues/8", Some("o/r"), None, "8"),
                reference("https://gitlab.com/o/r/merge_requests/10", Some("o/r"), None, "10"),
            ],
            duplicates: vec![action("/duplicate #13", "/duplicate", None, Some("#"), "13")],
            mentions: vec![mention("@user", "@", "user")],
            ..ParseResult::default()
        }
    );
}

#[test]
fn parse_with_default_options() {
    let result = Matcher::new(Base::default())
        .unwrap()
        .parse(
            "Fix #1 reSOLved gh-2 CLOSES Gh-3 fix o/r#4 #5 o/r#6 implementing #7 \
             https://github.com/o/r/issues/8 implementing https://github.com/o/r/issues/9 \
             Duplicate OF #10 @user",
        )
        .unwrap();

    assert_eq!(
        result,
        ParseResult {
            actions: vec![
                action("Fix #1", "Fix", None, Some("#"), "1"),
                action("reSOLved gh-2", "Resolved", None, Some("gh-"), "2"),
                action("CLOSES Gh-3", "Closes", None, Some("Gh-"), "3"),
                action("fix o/r#4", "Fix", Some("o/r"), Some("#"), "4"),
                action("implementing #7", "Implementing", None, Some("#"), "7"),
                action(
                    "implementing https://github.com/o/r/issues/9",
                    "Implementing",
                    Some("o/r"),
                    None,
                    "9"
                ),
            ],
            refs: vec![
                reference("#5", None, Some("#"), "5"),
                reference("o/r#6", Some("o/r"), Some("#"), "6"),
                reference("https://github.com/o/r/issues/8", Some("o/r"), None, "8"),
            ],
            duplicates: vec![action("Duplicate OF #10", "Duplicate of", None, Some("#"), "10")],
            mentions: vec![mention("@user", "@", "user")],
            ..ParseResult::default()
        }
    );
}

fn custom_options() -> serde_json::Value {
    json!({
        "referenceActions": ["fix"],
        "duplicateActions": [],
        "mentionsPrefixes": "!",
        "issuePrefixes": ["#"],
        "hosts": ["http://host1.com/", "http://host2.com"],
        "issueURLSegments": ["bugs"],
    })
}

const CUSTOM_TEXT: &str = "Fix #1 reSOLved gh-2 CLOSES Gh-3 fixed o/r#4 #5 o/r#6 fixing #7 \
    http://host1.com/o/r/bugs/8 http://host2.com/o/r/bugs/9 Duplicate OF #10 !user @other";

fn custom_expected() -> ParseResult {
    ParseResult {
        actions: vec![action("Fix #1", "Fix", None, Some("#"), "1")],
        refs: vec![
            reference("o/r#4", Some("o/r"), Some("#"), "4"),
            reference("#5", None, Some("#"), "5"),
            reference("o/r#6", Some("o/r"), Some("#"), "6"),
            reference("#7", None, Some("#"), "7"),
            reference("http://host1.com/o/r/bugs/8", Some("o/r"), None, "8"),
            reference("http://host2.com/o/r/bugs/9", Some("o/r"), None, "9"),
            reference("#10", None, Some("#"), "10"),
        ],
        mentions: vec![mention("!user", "!", "user")],
        ..ParseResult::default()
    }
}

#[test]
fn parse_with_custom_options() {
    let matcher = Matcher::new(base(custom_options())).unwrap();
    assert_eq!(matcher.parse(CUSTOM_TEXT).unwrap(), custom_expected());
}

#[test]
fn parse_with_options_overrides() {
    let overrides = Options::overrides_from_value(&custom_options()).unwrap();
    let matcher = Matcher::with_overrides(Preset::Default, overrides).unwrap();
    assert_eq!(matcher.parse(CUSTOM_TEXT).unwrap(), custom_expected());
}

#[test]
fn all_refs_returns_actions_refs_and_duplicates() {
    let result = parse("github", "Fix #1 #2 Duplicate of #3");
    assert_eq!(
        result.all_refs(),
        vec![
            &action("Fix #1", "Fix", None, Some("#"), "1"),
            &reference("#2", None, Some("#"), "2"),
            &action("Duplicate of #3", "Duplicate of", None, Some("#"), "3"),
        ]
    );
}

#[test]
fn ignore_malformed_references() {
    for text in ["Test#3", "Fix repo#3", "#3a", "Fix 3", "Fix #3a"] {
        assert!(parse("github", text).is_empty(), "{text} should not match");
    }
}

#[test]
fn parse_references() {
    assert_eq!(
        parse("github", "#1,#2").refs,
        vec![
            reference("#1", None, Some("#"), "1"),
            reference("#2", None, Some("#"), "2"),
        ]
    );
    assert_eq!(
        parse("github", "test ##1").refs,
        vec![reference("##1", None, Some("#"), "1")]
    );
    assert_eq!(
        parse("github", "#1#2").refs,
        vec![reference("#1", None, Some("#"), "1")]
    );
    assert_eq!(
        parse("github", "Fix #1Fix #2").refs,
        vec![reference("#2", None, Some("#"), "2")]
    );
}

#[test]
fn parse_actions() {
    let expected = vec![
        action("Fix #1", "Fix", None, Some("#"), "1"),
        action("Fix #2", "Fix", None, Some("#"), "2"),
    ];
    assert_eq!(parse("github", "Fix #1, Fix #2").actions, expected);
    assert_eq!(parse("github", "Fix #1,Fix #2").actions, expected);
    assert_eq!(
        parse("github", "fix #1, CLOSE #2").actions,
        vec![
            action("fix #1", "Fix", None, Some("#"), "1"),
            action("CLOSE #2", "Close", None, Some("#"), "2"),
        ]
    );
}

#[test]
fn colon_after_keyword_is_a_separator() {
    assert_eq!(
        parse("github", "Fixes: #1").actions,
        vec![action("Fixes: #1", "Fixes", None, Some("#"), "1")]
    );
}

#[test]
fn parse_duplicates() {
    assert_eq!(
        parse("github", "Duplicate of #1, DUPLICATE of #2").duplicates,
        vec![
            action("Duplicate of #1", "Duplicate of", None, Some("#"), "1"),
            action("DUPLICATE of #2", "Duplicate of", None, Some("#"), "2"),
        ]
    );
    assert_eq!(
        parse("gitlab", "/duplicate #1, /DUPLICATE #2").duplicates,
        vec![
            action("/duplicate #1", "/duplicate", None, Some("#"), "1"),
            action("/DUPLICATE #2", "/duplicate", None, Some("#"), "2"),
        ]
    );
}

#[test]
fn parse_mentions() {
    let two = vec![mention("@user", "@", "user"), mention("@user", "@", "user")];
    assert_eq!(parse("github", "@user@@user").mentions, two);
    assert_eq!(parse("github", "@user,@user").mentions, two);
    assert_eq!(parse("github", "@user, @user").mentions, two);
    assert_eq!(parse("github", "@user@user").mentions, two);
}

#[test]
fn relation_keywords_from_overrides() {
    let overrides = Options::overrides_from_value(&json!({
        "blocksActions": ["blocks"],
        "requiresActions": "depends on",
        "parentOfActions": ["parent of"],
        "childOfActions": ["child of"],
    }))
    .unwrap();
    let matcher = Matcher::with_overrides(Preset::GitHub, overrides).unwrap();
    let result = matcher
        .parse("Blocks #1, depends on o/r#2\nParent of #3 and child of #4. Fixes #5")
        .unwrap();

    assert_eq!(result.blocks, vec![action("Blocks #1", "Blocks", None, Some("#"), "1")]);
    assert_eq!(
        result.requires,
        vec![action("depends on o/r#2", "Depends on", Some("o/r"), Some("#"), "2")]
    );
    assert_eq!(result.parent_of[0].issue, "3");
    assert_eq!(result.child_of[0].issue, "4");
    assert_eq!(result.actions[0].issue, "5");

    let order: Vec<&str> = result.all_refs().iter().map(|r| r.issue.as_str()).collect();
    assert_eq!(order, vec!["5", "1", "2", "3", "4"]);
}

#[test]
fn exclude_code_blocks_with_backtick() {
    let text = "Fix #1, \\`Fix #2\\` `Fix #3` `\\`Fix #4\\``\n```js\nFix #5\n```";
    assert_eq!(
        parse("github", text).actions,
        vec![
            action("Fix #1", "Fix", None, Some("#"), "1"),
            action("Fix #2", "Fix", None, Some("#"), "2"),
        ]
    );
}

#[test]
fn exclude_code_blocks_with_html_tags() {
    let fix_1 = vec![action("Fix #1", "Fix", None, Some("#"), "1")];

    assert_eq!(
        parse(
            "github",
            "Fix #1 <code>Fix #2</code> Fix #3 <code>\nFix #4</code> <CODE> Fix#5</CODE> \
             <code><code>Fix #6</code>Fix #7</code>"
        )
        .actions,
        vec![
            action("Fix #1", "Fix", None, Some("#"), "1"),
            action("Fix #3", "Fix", None, Some("#"), "3"),
        ]
    );
    assert_eq!(
        parse("github", "Fix #1<code><code>Fix #2</code></code>").actions,
        fix_1
    );
    assert_eq!(
        parse("github", "Fix #1<code><code>\nFix #2\n</code></code>").actions,
        fix_1
    );
    assert_eq!(parse("github", "`<code>`Fix #1</code>").actions, fix_1);
}

#[test]
fn empty_options() {
    let matcher = Matcher::new(base(json!({
        "referenceActions": [],
        "issuePrefixes": [],
        "mentionsPrefixes": [],
    })))
    .unwrap();
    assert!(matcher.parse("Fix #1, @user").unwrap().is_empty());

    let matcher = Matcher::new(base(json!({
        "referenceActions": ["", "", "fix"],
        "issuePrefixes": ["", "#"],
        "mentionsPrefixes": ["@", ""],
    })))
    .unwrap();
    assert_eq!(
        matcher.parse("Fix #1,@user").unwrap(),
        ParseResult {
            actions: vec![action("Fix #1", "Fix", None, Some("#"), "1")],
            mentions: vec![mention("@user", "@", "user")],
            ..ParseResult::default()
        }
    );
}

#[test]
fn every_vocabulary_empty() {
    let matcher = Matcher::new(base(json!({
        "referenceActions": [],
        "duplicateActions": [],
        "mentionsPrefixes": [],
        "issuePrefixes": [],
        "hosts": [],
        "issueURLSegments": [],
    })))
    .unwrap();
    assert!(matcher.patterns().main().is_none());
    assert!(matcher
        .parse("Fix #1 https://github.com/o/r/issues/2 @user")
        .unwrap()
        .is_empty());
}

#[test]
fn empty_string() {
    let matcher = Matcher::new(Preset::Default).unwrap();
    assert!(matcher.parse("   ").unwrap().is_empty());
    assert!(matcher.parse("").unwrap().is_empty());

    let strict = matcher.reject_blank(true);
    assert_eq!(strict.parse(""), Err(InputError::Blank));
    assert_eq!(strict.parse(" \r\n"), Err(InputError::Blank));
}

#[test]
fn invalid_options() {
    assert!(matches!(
        Matcher::named("missing-option"),
        Err(ConfigError::UnknownPreset(_))
    ));
    assert!(matches!(
        Base::from_value(&json!([])),
        Err(ConfigError::InvalidBase)
    ));
    assert!(matches!(
        Base::from_value(&json!(1)),
        Err(ConfigError::InvalidBase)
    ));
    assert!(matches!(
        Base::from_value(&json!({ "referenceActions": 1 })),
        Err(ConfigError::InvalidOptionType { .. })
    ));
    assert!(matches!(
        Base::from_value(&json!({ "referenceActions": [1] })),
        Err(ConfigError::InvalidOptionType { .. })
    ));
    assert!(matches!(
        Base::from_value(&json!({ "referenceAction": ["fix"] })),
        Err(ConfigError::UnknownOption(_))
    ));
}

#[test]
fn invalid_overrides() {
    for value in [json!([]), json!(1), json!(""), json!("string")] {
        assert!(matches!(
            Options::overrides_from_value(&value),
            Err(ConfigError::InvalidOverrides)
        ));
    }
    assert!(matches!(
        Options::overrides_from_value(&json!({ "referenceActions": 1 })),
        Err(ConfigError::InvalidOptionType { .. })
    ));
    assert!(matches!(
        Options::overrides_from_value(&json!({ "referenceActions": [1] })),
        Err(ConfigError::InvalidOptionType { .. })
    ));
}

#[test]
fn invalid_input() {
    let matcher = Matcher::new(Preset::Default).unwrap();
    assert_eq!(
        matcher.parse_bytes(&[0x46, 0x69, 0x78, 0x80]),
        Err(InputError::InvalidUtf8 { offset: 3 })
    );
}

#[test]
fn matcher_is_shared_across_threads() {
    let matcher = std::sync::Arc::new(Matcher::new(Preset::GitHub).unwrap());
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let matcher = std::sync::Arc::clone(&matcher);
            std::thread::spawn(move || matcher.parse(&format!("Fix #{n}")).unwrap())
        })
        .collect();

    for (n, handle) in (1..=4).zip(handles) {
        let result = handle.join().unwrap();
        assert_eq!(result.actions[0].issue, n.to_string());
    }
}

/// Test setup that creates a temporary git repository with test commits
struct TestRepo {
    _temp_dir: TempDir,
    repo_path: PathBuf,
    repo: Repository,
    commits: Vec<git2::Oid>,
}

impl TestRepo {
    fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let repo_path = temp_dir.path().to_path_buf();

        let repo = Repository::init(&repo_path)?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        Ok(TestRepo {
            _temp_dir: temp_dir,
            repo_path,
            repo,
            commits: Vec::new(),
        })
    }

    fn add_commit(&mut self, message: &str, content: &str) -> Result<git2::Oid> {
        let file_path = self.repo_path.join("test.txt");
        fs::write(&file_path, content)?;

        let mut index = self.repo.index()?;
        index.add_path(std::path::Path::new("test.txt"))?;
        index.write()?;

        let signature = Signature::now("Test User", "test@example.com")?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent_commit = match self.commits.last() {
            Some(last_commit_id) => Some(self.repo.find_commit(*last_commit_id)?),
            None => None,
        };
        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        let commit_id = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        self.commits.push(commit_id);
        Ok(commit_id)
    }

    fn commits_command(&self, range: &str, only_matching: bool) -> CommitsCommand {
        CommitsCommand {
            range: range.to_string(),
            repo: self.repo_path.clone(),
            matcher: MatcherArgs {
                preset: Some("github".to_string()),
                ..MatcherArgs::default()
            },
            format: OutputFormat::Json,
            only_matching,
        }
    }
}

#[test]
fn commits_command_with_temporary_repo() -> Result<()> {
    let mut test_repo = TestRepo::new()?;
    let initial = test_repo.add_commit("Initial commit", "Hello, world!")?;
    test_repo.add_commit("Fix #1 in the parser", "Hello, world!\nFixed.")?;
    test_repo.add_commit("Tidy up", "Hello, world!\nFixed.\nTidy.")?;
    test_repo.add_commit(
        "Update docs\n\nCloses gh-2, see `#3`. Thanks @alice",
        "Hello, world!\nFixed.\nTidy.\nDocs.",
    )?;

    let settings = Settings::default();

    let reports = test_repo
        .commits_command(&format!("{initial}..HEAD"), false)
        .run(&settings)?;
    let summaries: Vec<&str> = reports.iter().map(|r| r.summary.as_str()).collect();
    assert_eq!(summaries, vec!["Fix #1 in the parser", "Tidy up", "Update docs"]);

    assert_eq!(reports[0].report.result.actions[0].issue, "1");
    assert!(reports[1].report.result.is_empty());
    assert_eq!(
        reports[2].report.result.actions,
        vec![action("Closes gh-2", "Closes", None, Some("gh-"), "2")]
    );
    assert_eq!(reports[2].report.result.mentions[0].user, "alice");
    assert!(reports[2].report.result.refs.is_empty());

    let matching = test_repo
        .commits_command(&format!("{initial}..HEAD"), true)
        .run(&settings)?;
    assert_eq!(matching.len(), 2);

    let head = test_repo.commits_command("HEAD", false).run(&settings)?;
    assert_eq!(head.len(), 1);
    assert_eq!(head[0].hash, test_repo.commits[3].to_string());

    let json = serde_json::to_value(&head)?;
    assert_eq!(json[0]["allRefs"][0]["issue"], "2");
    assert_eq!(json[0]["summary"], "Update docs");

    Ok(())
}

#[test]
fn commits_command_reports_bad_range() -> Result<()> {
    let mut test_repo = TestRepo::new()?;
    test_repo.add_commit("Initial commit", "Hello, world!")?;

    let err = test_repo
        .commits_command("no-such-branch..HEAD", false)
        .run(&Settings::default())
        .unwrap_err();
    assert!(err.to_string().contains("no-such-branch"));
    Ok(())
}

#[test]
fn help_all_output() -> Result<()> {
    use issue_parser::cli::HelpGenerator;

    let help_output = HelpGenerator::new().generate_all_help()?;
    insta::assert_snapshot!("help_all_output", help_output);
    Ok(())
}

#[test]
fn code_regions_exposed_by_removal_are_excluded() {
    let result = parse("github", "`Fix #1 <code>\nFix #3</code> Fix #2`\nFix #4");
    assert_eq!(
        result.actions,
        vec![action("Fix #4", "Fix", None, Some("#"), "4")]
    );
}

#[test]
fn text_after_closing_fence_is_parsed() {
    let result = parse("github", "```\ncode #1\n``` Fixes #2");
    assert_eq!(
        result.actions,
        vec![action("Fixes #2", "Fixes", None, Some("#"), "2")]
    );
}

mod prop {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Token {
        Action(u32),
        Reference(u32),
        Duplicate(u32),
        Mention(String),
    }

    impl Token {
        fn render(&self) -> String {
            match self {
                Self::Action(n) => format!("Fixes #{n}"),
                Self::Reference(n) => format!("#{n}"),
                Self::Duplicate(n) => format!("Duplicate of #{n}"),
                Self::Mention(user) => format!("@{user}"),
            }
        }
    }

    fn token() -> impl Strategy<Value = Token> {
        prop_oneof![
            (1u32..100_000).prop_map(Token::Action),
            (1u32..100_000).prop_map(Token::Reference),
            (1u32..100_000).prop_map(Token::Duplicate),
            // Handles never start like a keyword.
            "u[a-z0-9]{0,7}".prop_map(Token::Mention),
        ]
    }

    fn separator() -> impl Strategy<Value = &'static str> {
        proptest::sample::select(vec![" ", ", ", "\n", ". ", " - "])
    }

    fn issues(refs: &[Reference]) -> Vec<String> {
        refs.iter().map(|r| r.issue.clone()).collect()
    }

    fn picked(tokens: &[Token], pick: fn(&Token) -> Option<String>) -> Vec<String> {
        tokens.iter().filter_map(pick).collect()
    }

    fn flip_case(word: &str, mask: &[bool]) -> String {
        word.chars()
            .zip(mask.iter().cycle())
            .map(|(c, &upper)| {
                if upper {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn every_token_lands_in_its_own_bucket(
            tokens in proptest::collection::vec(token(), 1..12),
            sep in separator(),
        ) {
            let text = tokens.iter().map(Token::render).collect::<Vec<_>>().join(sep);
            let result = parse("github", &text);

            prop_assert_eq!(issues(&result.actions), picked(&tokens, |t| match t {
                Token::Action(n) => Some(n.to_string()),
                _ => None,
            }));
            prop_assert_eq!(issues(&result.refs), picked(&tokens, |t| match t {
                Token::Reference(n) => Some(n.to_string()),
                _ => None,
            }));
            prop_assert_eq!(issues(&result.duplicates), picked(&tokens, |t| match t {
                Token::Duplicate(n) => Some(n.to_string()),
                _ => None,
            }));
            prop_assert_eq!(
                result.mentions.iter().map(|m| m.user.clone()).collect::<Vec<_>>(),
                picked(&tokens, |t| match t {
                    Token::Mention(user) => Some(user.clone()),
                    _ => None,
                })
            );
            prop_assert_eq!(
                result.all_refs().len(),
                result.actions.len() + result.refs.len() + result.duplicates.len()
            );
        }

        #[test]
        fn keywords_match_in_any_case(
            keyword in proptest::sample::select(vec!["fix", "fixes", "closed", "resolves"]),
            mask in proptest::collection::vec(any::<bool>(), 1..8),
            issue in 1u32..10_000,
        ) {
            let text = format!("{} #{issue}", flip_case(keyword, &mask));
            let result = parse("github", &text);

            prop_assert_eq!(result.actions.len(), 1);
            let mut expected = keyword.to_string();
            expected[..1].make_ascii_uppercase();
            prop_assert_eq!(result.actions[0].action.clone(), Some(expected));
            prop_assert_eq!(result.actions[0].raw.clone(), text);
        }

        #[test]
        fn fenced_tokens_are_ignored(
            outer in proptest::collection::vec(token(), 0..4),
            inner in proptest::collection::vec(token(), 1..4),
        ) {
            let outer = outer.iter().map(Token::render).collect::<Vec<_>>().join(" ");
            let inner = inner.iter().map(Token::render).collect::<Vec<_>>().join(" ");

            let fenced = format!("{outer}\n```\n{inner}\n```\n{outer}");
            let bare = format!("{outer}\n\n{outer}");
            prop_assert_eq!(parse("github", &fenced), parse("github", &bare));
        }
    }
}
