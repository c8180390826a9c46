//! CLI Command Tests
//!
//! Tests for all CLI commands with a mocked backend.
//! Covers argument parsing, JSON output format, exit codes and the saved
//! session.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use playmood::cli::{Cli, Command, IdArg, WatchlistCmd};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["playmood"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_read_commands() {
        let cli = Cli::parse_from(["playmood", "home"]);
        assert_eq!(cli.command, Some(Command::Home));

        let cli = Cli::parse_from(["playmood", "channel", "64f0c2"]);
        assert_eq!(
            cli.command,
            Some(Command::Channel(IdArg { id: "64f0c2".into() }))
        );
        assert!(!cli.command.is_some_and(|c| c.needs_session()));
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::parse_from(["playmood", "ch"]);
        assert_eq!(cli.command, Some(Command::Channels));

        let cli = Cli::parse_from(["playmood", "c", "c1"]);
        assert_eq!(cli.command, Some(Command::Content(IdArg { id: "c1".into() })));

        let cli = Cli::parse_from(["playmood", "wl", "ls"]);
        assert_eq!(cli.command, Some(Command::Watchlist(WatchlistCmd::List)));
    }

    #[test]
    fn test_session_commands() {
        for args in [
            vec!["playmood", "like", "c1"],
            vec!["playmood", "unlike", "c1"],
            vec!["playmood", "likes"],
            vec!["playmood", "watchlist", "add", "c1"],
        ] {
            let cli = Cli::parse_from(args.clone());
            assert!(
                cli.command.is_some_and(|c| c.needs_session()),
                "{:?} should need a session",
                args
            );
        }
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(Cli::try_parse_from(["playmood", "content"]).is_err());
        assert!(Cli::try_parse_from(["playmood", "watchlist", "add"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["playmood", "likes", "--json", "-q"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
    }
}

// =============================================================================
// JSON Output Tests
// =============================================================================

mod json_output {
    use playmood::cli::{ExitCode, JsonOutput, StatusOk};

    #[test]
    fn test_json_output_success() {
        let output = JsonOutput::success(vec!["c1", "c2"]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["data"], serde_json::json!(["c1", "c2"]));
        assert!(json.get("error").is_none());
        assert!(json.get("exit_code").is_none());
    }

    #[test]
    fn test_json_output_error() {
        let output = JsonOutput::<()>::error_msg("Content not found: c9", ExitCode::NotFound);
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["error"], "Content not found: c9");
        assert_eq!(json["exit_code"], 4);
    }

    #[test]
    fn test_status_ok_format() {
        let json = serde_json::to_string(&StatusOk::default()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use mockito::Server;
    use playmood::api::PlaymoodClient;
    use playmood::cli::{ExitCode, IdArg, LoginCmd, Output, WatchlistCmd};
    use playmood::commands;
    use playmood::config::Config;
    use playmood::focus::{Phase, RecordPhase};

    fn quiet() -> Output {
        Output {
            json: false,
            quiet: true,
        }
    }

    fn id(id: &str) -> IdArg {
        IdArg { id: id.into() }
    }

    fn signed_in_config(dir: &tempfile::TempDir) -> Config {
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\ntoken = \"tok\"\nuser_id = \"u1\"\nname = \"Ana\"\n",
        )
        .unwrap();
        Config::load_from(&path)
    }

    #[tokio::test]
    async fn test_home_success() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/content/")
            .with_status(200)
            .with_body(r#"[{"_id":"c1","title":"One","category":"Social"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/content/top-ten")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = PlaymoodClient::new(server.url());
        assert_eq!(commands::home_cmd(&client, &quiet()).await, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_home_server_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/content/")
            .with_status(503)
            .create_async()
            .await;
        server
            .mock("GET", "/api/content/top-ten")
            .with_status(503)
            .create_async()
            .await;

        let client = PlaymoodClient::new(server.url());
        assert_eq!(commands::home_cmd(&client, &quiet()).await, ExitCode::Error);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client = PlaymoodClient::new("http://127.0.0.1:1");
        assert_eq!(
            commands::channels_cmd(&client, &quiet()).await,
            ExitCode::NetworkError
        );
    }

    #[tokio::test]
    async fn test_content_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/content/c9")
            .with_status(404)
            .create_async()
            .await;

        let client = PlaymoodClient::new(server.url());
        assert_eq!(
            commands::content_cmd(id("c9"), &client, &quiet()).await,
            ExitCode::NotFound
        );
    }

    #[tokio::test]
    async fn test_load_channel_sections() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/channel/cr1")
            .with_status(200)
            .with_body(r#"{"_id":"cr1","name":"Studio","subscribers":12,"content":[{"_id":"v1"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/highlights/creator/cr1")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/api/feed/user/cr1")
            .with_status(200)
            .with_body(r#"[{"_id":"f1"},{"_id":"f2"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/playlists/user/cr1/public")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/api/community/cr1")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = PlaymoodClient::new(server.url());
        let screen = commands::load_channel(&client, "cr1").await;

        assert!(matches!(screen.header(), RecordPhase::Ready(c) if c.name == "Studio"));
        assert_eq!(screen.videos_phase(), Phase::Ready);
        assert_eq!(screen.highlights.phase(), &Phase::Empty);
        assert_eq!(screen.feed.list().len(), 2);
        assert_eq!(
            screen.playlists.phase(),
            &Phase::Error("Failed to load playlists.".into())
        );
        assert_eq!(screen.community.phase(), &Phase::Empty);

        assert_eq!(
            commands::channel_cmd(id("cr1"), &client, &quiet()).await,
            ExitCode::Success
        );
    }

    #[tokio::test]
    async fn test_channel_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = PlaymoodClient::new(server.url());
        assert_eq!(
            commands::channel_cmd(id("ghost"), &client, &quiet()).await,
            ExitCode::NotFound
        );
    }

    #[tokio::test]
    async fn test_like_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml"));
        let client = PlaymoodClient::new("http://127.0.0.1:1");

        let code = commands::like_cmd(id("c1"), true, &client, &config, &quiet()).await;
        assert_eq!(code, ExitCode::NotSignedIn);
    }

    #[tokio::test]
    async fn test_watchlist_add_with_saved_session() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/content/watchlist/c1")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"{"watchlist":["c1"]}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = signed_in_config(&dir);
        let client = PlaymoodClient::new(server.url()).with_token("tok");

        let code =
            commands::watchlist_cmd(WatchlistCmd::Add(id("c1")), &client, &config, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_expired_session() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/users/likes")
            .with_status(401)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = signed_in_config(&dir);
        let client = PlaymoodClient::new(server.url()).with_token("stale");

        assert_eq!(
            commands::likes_cmd(&client, &config, &quiet()).await,
            ExitCode::NotSignedIn
        );
    }

    #[tokio::test]
    async fn test_login_saves_session_and_logout_forgets_it() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/users/login")
            .with_status(200)
            .with_body(r#"{"_id":"u1","name":"Ana","email":"ana@example.com","token":"tok"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::load_from(&path);
        let client = PlaymoodClient::new(server.url());
        let cmd = LoginCmd {
            email: "ana@example.com".into(),
            password: "secret".into(),
        };

        assert_eq!(
            commands::login_cmd(cmd, &client, &mut config, &quiet()).await,
            ExitCode::Success
        );
        let saved = Config::load_from(&path);
        assert_eq!(saved.session.as_ref().map(|s| s.token.as_str()), Some("tok"));

        let mut config = saved;
        assert_eq!(commands::logout_cmd(&mut config, &quiet()), ExitCode::Success);
        assert!(Config::load_from(&path).session.is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load_from(&dir.path().join("config.toml"));
        let client = PlaymoodClient::new("http://127.0.0.1:1");
        let cmd = LoginCmd {
            email: "  ".into(),
            password: "pw".into(),
        };
        assert_eq!(
            commands::login_cmd(cmd, &client, &mut config, &quiet()).await,
            ExitCode::InvalidArgs
        );
    }
}
