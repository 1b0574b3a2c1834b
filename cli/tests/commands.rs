//! CLI command tests against a temporary LMDB ledger.

use clap::Parser;
use tally_cli::{run, Cli, CliError, Command, LedgerCommand, TallyConfig};
use tally_governance::GovernanceError;

fn config_in(dir: &tempfile::TempDir) -> TallyConfig {
    let toml = r#"
        map_size_mb = 8

        [balances]
        A = 500
        B = 0
        C = 200
    "#;
    let mut config = TallyConfig::from_toml_str(toml).unwrap();
    config.data_dir = dir.path().join("ledger");
    config
}

fn invoke(config: &TallyConfig, args: &[&str]) -> Result<String, CliError> {
    let mut argv = vec!["tally"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("valid arguments");
    run(config, &cli.command)
}

#[test]
fn budget_walkthrough_persists_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    assert_eq!(
        invoke(&config, &["propose", "Increase dev budget by 50%"]).unwrap(),
        "1\n"
    );
    invoke(&config, &["vote", "1", "--account", "A"]).unwrap();

    let err = invoke(&config, &["vote", "1", "--account", "A"]).unwrap_err();
    assert!(matches!(
        err,
        CliError::Governance(GovernanceError::AlreadyVoted { .. })
    ));
    let err = invoke(&config, &["vote", "1", "--account", "B"]).unwrap_err();
    assert!(matches!(
        err,
        CliError::Governance(GovernanceError::NoVotingPower { .. })
    ));

    let out = invoke(&config, &["vote", "#1", "--account", "C"]).unwrap();
    assert_eq!(out, "voted on #1; vote_count = 700\n");

    assert_eq!(
        invoke(&config, &["show", "1"]).unwrap(),
        "description: Increase dev budget by 50%\nvote_count: 700\nexecuted: false\n"
    );
    assert_eq!(invoke(&config, &["voters", "1"]).unwrap(), "A\t500\nC\t200\n");
    assert_eq!(
        invoke(&config, &["list"]).unwrap(),
        "1\t700\tIncrease dev budget by 50%\n"
    );
}

#[test]
fn show_unknown_proposal_prints_zero_triple() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    assert_eq!(
        invoke(&config, &["show", "9"]).unwrap(),
        "description: \nvote_count: 0\nexecuted: false\ncreated: false\n"
    );

    let err = invoke(&config, &["vote", "9", "--account", "A"]).unwrap_err();
    assert!(matches!(
        err,
        CliError::Governance(GovernanceError::ProposalNotFound(_))
    ));
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.toml");
    std::fs::write(&path, "log_level = \"debug\"\ndata_dir = \"/from/file\"\n").unwrap();

    let cli = Cli::try_parse_from([
        "tally",
        "--config",
        path.to_str().unwrap(),
        "--data-dir",
        "/from/flag",
        "--log-format",
        "json",
        "list",
    ])
    .unwrap();
    let config = cli.resolve_config().unwrap();
    assert_eq!(config.data_dir, std::path::PathBuf::from("/from/flag"));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.log_format, tally_utils::LogFormat::Json);
    assert!(matches!(cli.command, Command::Ledger(LedgerCommand::List)));
}

#[test]
fn malformed_arguments_are_rejected_by_the_parser() {
    assert!(Cli::try_parse_from(["tally", "vote", "one", "--account", "A"]).is_err());
    assert!(Cli::try_parse_from(["tally", "vote", "1", "--account", ""]).is_err());
    assert!(Cli::try_parse_from(["tally", "--log-format", "xml", "list"]).is_err());
}

#[test]
fn init_config_prints_parseable_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let out = invoke(&config, &["init-config"]).unwrap();
    assert_eq!(TallyConfig::from_toml_str(&out).unwrap(), TallyConfig::default());
}

#[test]
fn init_config_leaves_data_dir_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(&dir);
    // An invalid balance table would fail any command that opens the ledger.
    config.balances.insert("not an account".to_string(), 1);

    invoke(&config, &["init-config"]).unwrap();
    assert!(!config.data_dir.exists());

    let err = invoke(&config, &["list"]).unwrap_err();
    assert!(matches!(err, CliError::Config(_)), "{err:?}");
    assert!(!config.data_dir.exists());
}

#[test]
fn init_config_is_not_a_ledger_command() {
    let cli = Cli::try_parse_from(["tally", "init-config"]).unwrap();
    assert!(matches!(cli.command, Command::InitConfig));
    let cli = Cli::try_parse_from(["tally", "show", "3"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Ledger(LedgerCommand::Show { .. })
    ));
}
