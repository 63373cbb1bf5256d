//! CLI commands routed through RunContext against an isolated workspace

use clap::Parser;
use replicate_runner::cli::{command_name, Cli, RunContext};
use replicate_runner::error::ProfileError;
use tempfile::TempDir;

use crate::integration::{with_xdg_env, write_layer};

fn run(ctx: &RunContext, args: &[&str]) -> Result<String, ProfileError> {
    let mut argv = vec!["replicate-runner"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    ctx.execute(&cli.command)
}

fn workspace_with_profiles(temp: &TempDir) -> std::path::PathBuf {
    let workspace = temp.path().join("ws");
    write_layer(
        &workspace,
        "config/profiles.yaml",
        "profiles:\n  andie:\n    model: owner/flux\n    lora: hf/andie\n    trigger: andie\n    prompt_template: \"{trigger} {action}\"\n",
    );
    write_layer(
        &workspace,
        "config/runner.toml",
        "[paths]\npersona_catalog = \"config/actions.yaml\"\n",
    );
    write_layer(
        &workspace,
        "config/actions.yaml",
        "actions:\n  - tokens: [andie]\n    text: painting a mural\n",
    );
    workspace
}

#[test]
fn test_command_names() {
    let cli = Cli::try_parse_from(["replicate-runner", "profile", "show", "andie"]).unwrap();
    assert_eq!(command_name(&cli.command), "profile.show");
    let cli = Cli::try_parse_from(["replicate-runner", "prompt", "render"]).unwrap();
    assert_eq!(command_name(&cli.command), "prompt.render");
}

#[test]
fn test_run_flags_parse() {
    let cli = Cli::try_parse_from([
        "replicate-runner",
        "profile",
        "resolve",
        "andie",
        "--param",
        "steps:30",
        "--param",
        "guidance:3.5",
        "--no-persona-action",
        "--seed",
        "7",
    ]);
    assert!(cli.is_ok());

    let bad_seed = Cli::try_parse_from(["replicate-runner", "persona", "pick", "--seed", "x"]);
    assert!(bad_seed.is_err());
}

#[test]
fn test_workspace_profiles_and_catalog_from_settings() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = workspace_with_profiles(&temp);
        let ctx = RunContext::new(workspace.clone(), None).unwrap();
        assert_eq!(
            ctx.paths().persona_catalog,
            Some(workspace.join("config/actions.yaml"))
        );

        let list = run(&ctx, &["profile", "list", "--format", "json"]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&list).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["profiles"][0]["name"], "andie");

        let pick = run(&ctx, &["persona", "pick", "--token", "andie"]).unwrap();
        assert_eq!(pick, "painting a mural");

        let prompt = run(
            &ctx,
            &["prompt", "render", "--profile", "andie", "--action", "waving"],
        )
        .unwrap();
        assert_eq!(prompt, "andie waving");
    });
}

#[test]
fn test_save_show_and_unset_in_user_scope() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = workspace_with_profiles(&temp);
        let ctx = RunContext::new(workspace, None).unwrap();

        let saved = run(
            &ctx,
            &[
                "profile",
                "save",
                "andie",
                "--lora",
                "hf/andie-user",
                "--param",
                "steps:30",
            ],
        )
        .unwrap();
        assert!(saved.contains("Saved profile 'andie' to user scope"));
        assert!(temp.path().join("replicate-runner/profiles.yaml").exists());

        let shown = run(&ctx, &["profile", "show", "andie", "--format", "json"]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(json["lora"], "hf/andie-user");
        assert_eq!(json["provenance"]["lora"], "user");
        assert_eq!(json["provenance"]["model"], "workspace");
        assert_eq!(json["defaults"]["params"]["steps"], 30);

        run(&ctx, &["profile", "save", "andie", "--unset", "lora"]).unwrap();
        let shown = run(&ctx, &["profile", "show", "andie", "--format", "json"]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(json["lora"], "hf/andie");
        assert_eq!(json["provenance"]["lora"], "workspace");
    });
}

#[test]
fn test_resolve_json_includes_command() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = workspace_with_profiles(&temp);
        let ctx = RunContext::new(workspace, None).unwrap();
        let out = run(
            &ctx,
            &[
                "profile",
                "resolve",
                "andie",
                "--action",
                "waving",
                "--format",
                "json",
            ],
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["rendered_prompt"], "andie waving");
        assert_eq!(json["params"]["hf_lora"], "hf/andie");
        assert!(json["command"]
            .as_str()
            .unwrap()
            .starts_with("replicate-runner replicate run-model owner/flux"));
    });
}

#[test]
fn test_show_unknown_profile() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = workspace_with_profiles(&temp);
        let ctx = RunContext::new(workspace, None).unwrap();
        let err = run(&ctx, &["profile", "show", "nobody"]).unwrap_err();
        assert!(matches!(err, ProfileError::ProfileNotFound(_)));
    });
}
