use super::*;

fn default_config() -> AppConfig {
    // Same values the loader produces from an empty environment.
    let base = parse_base_url(lotscan_core::config::DEFAULT_BASE_URL).unwrap();
    let listing_urls =
        parse_listing_urls(&base, lotscan_core::config::DEFAULT_LISTING_PATHS).unwrap();
    AppConfig {
        base_url: base,
        listing_urls,
        output_path: PathBuf::from(lotscan_core::config::DEFAULT_OUTPUT_PATH),
        log_level: "info".to_string(),
        user_agent: lotscan_core::config::DEFAULT_USER_AGENT.to_string(),
        headless: true,
        chrome_executable: None,
        nav_timeout_secs: 30,
        pacing: lotscan_core::Pacing::default(),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["lotscan-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "lotscan-cli",
        "run",
        "--output",
        "/tmp/inv.csv",
        "--base-url",
        "https://dealer.test",
        "--listing",
        "/inventory/new",
        "--listing",
        "/inventory/certified",
        "--headed",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Run { target, output }) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(output, Some(PathBuf::from("/tmp/inv.csv")));
    assert_eq!(target.base_url.as_deref(), Some("https://dealer.test"));
    assert_eq!(target.listings, vec!["/inventory/new", "/inventory/certified"]);
    assert!(target.headed);
}

#[test]
fn parses_links_command() {
    let cli = Cli::try_parse_from(["lotscan-cli", "links"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Links { ref target }) if target.listings.is_empty() && !target.headed
    ));
}

#[test]
fn parses_extract_urls() {
    let cli = Cli::try_parse_from([
        "lotscan-cli",
        "extract",
        "https://dealer.test/viewdetails/new/A/a",
        "https://dealer.test/viewdetails/used/B/b",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Extract { urls, output, headed }) = cli.command else {
        panic!("expected extract command");
    };
    assert_eq!(urls.len(), 2);
    assert!(output.is_none());
    assert!(!headed);
}

#[test]
fn extract_requires_a_url() {
    assert!(Cli::try_parse_from(["lotscan-cli", "extract"]).is_err());
}

#[test]
fn target_without_flags_leaves_config_alone() {
    let mut config = default_config();
    TargetArgs::default().apply(&mut config).unwrap();
    assert_eq!(config.base_url.as_str(), "https://www.toyotagallatin.com/");
    assert_eq!(config.listing_urls.len(), 2);
    assert!(config.headless);
}

#[test]
fn base_url_override_reroots_configured_listings() {
    let mut config = default_config();
    let target = TargetArgs {
        base_url: Some("https://dealer.test".to_string()),
        ..TargetArgs::default()
    };

    target.apply(&mut config).unwrap();

    let listings: Vec<&str> = config.listing_urls.iter().map(url::Url::as_str).collect();
    assert_eq!(
        listings,
        vec!["https://dealer.test/inventory/new", "https://dealer.test/inventory/used"]
    );
}

#[test]
fn listing_override_replaces_configured_listings() {
    let mut config = default_config();
    let target = TargetArgs {
        listings: vec!["/inventory/certified".to_string()],
        headed: true,
        ..TargetArgs::default()
    };

    target.apply(&mut config).unwrap();

    assert_eq!(config.listing_urls.len(), 1);
    assert_eq!(
        config.listing_urls[0].as_str(),
        "https://www.toyotagallatin.com/inventory/certified"
    );
    assert!(!config.headless);
}

#[test]
fn invalid_base_url_override_is_an_error() {
    let mut config = default_config();
    let target = TargetArgs {
        base_url: Some("ftp://dealer.test".to_string()),
        ..TargetArgs::default()
    };
    let err = target.apply(&mut config).unwrap_err();
    assert!(err.to_string().contains("--base-url"), "got: {err}");
}
