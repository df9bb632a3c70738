use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;
use roost_core::sessions::DEFAULT_WORKFLOW;

pub fn build_cli() -> Command {
    Command::new("roost")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pick a project, land in its tmux session")
        .long_about("roost lists the projects under a workspace directory together with the repositories of a GitHub owner, and opens the chosen one as a tmux session built from a layout preset. Running roost without a subcommand starts the picker.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("workspace")
                .short('w')
                .long("workspace")
                .help("Workspace key from the config, or 'current' to use the attached session's workspace")
                .global(true),
        )
        .subcommand(
            Command::new("pick")
                .about("Choose a project interactively and open it (default)")
        )
        .subcommand(
            Command::new("open")
                .about("Open a project by name, cloning it first if it only exists remotely")
                .arg(
                    Arg::new("project")
                        .help("Project name, optionally with ':file' and ':command' suffixes")
                        .required(true)
                        .index(1)
                )
        )
        .subcommand(
            Command::new("new")
                .about("Create a project directory and open it")
                .arg(
                    Arg::new("name")
                        .help("Project directory name")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("gh")
                        .long("gh")
                        .help("Also create the GitHub repository and push an initial commit")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("private")
                        .long("private")
                        .help("Make the GitHub repository private")
                        .requires("gh")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("search")
                .about("Search code across the workspace owner's repositories and open a hit")
                .arg(
                    Arg::new("terms")
                        .help("Search terms")
                        .required(true)
                        .num_args(1..)
                        .index(1)
                )
        )
        .subcommand(
            Command::new("actions")
                .about("Show the latest workflow run per deployment branch of a project")
                .arg(
                    Arg::new("project")
                        .help("Project name")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("workflow")
                        .long("workflow")
                        .help("Workflow file name")
                        .default_value(DEFAULT_WORKFLOW)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("prs")
                .about("List open pull requests for a project's branch")
                .arg(
                    Arg::new("project")
                        .help("Project name")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("branch")
                        .long("branch")
                        .short('b')
                        .help("Head branch (default: the checked-out branch)")
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("active")
                .about("Choose among the running sessions of the workspace")
        )
        .subcommand(
            Command::new("close-all")
                .about("Kill every session belonging to the workspace")
        )
        .subcommand(
            Command::new("cache")
                .about("Inspect or reset the workspace cache")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("clear")
                        .about("Delete the cache file of the workspace")
                )
                .subcommand(
                    Command::new("status")
                        .about("Show where the cache lives and what it holds")
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .help("Output in JSON format")
                                .action(ArgAction::SetTrue)
                        )
                )
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("init")
                        .about("Write the default configuration file")
                )
                .subcommand(
                    Command::new("path")
                        .about("Print the configuration file path")
                )
        )
        .subcommand(
            Command::new("filter")
                .about("Print a tmux format that matches the workspace's sessions")
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(Shell))
                )
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "roost");
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let matches = build_cli().try_get_matches_from(vec!["roost"]).unwrap();
        assert!(matches.subcommand().is_none());
        assert!(!matches.get_flag("verbose"));
    }

    #[test]
    fn test_open_requires_project() {
        let app = build_cli();
        assert!(app.try_get_matches_from(vec!["roost", "open"]).is_err());

        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "open", "api:src/main.rs:/todo"])
            .unwrap();
        let sub = matches.subcommand_matches("open").unwrap();
        assert_eq!(
            sub.get_one::<String>("project").unwrap(),
            "api:src/main.rs:/todo"
        );
    }

    #[test]
    fn test_new_private_requires_gh() {
        assert!(
            build_cli()
                .try_get_matches_from(vec!["roost", "new", "svc", "--private"])
                .is_err()
        );

        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "new", "svc", "--gh", "--private"])
            .unwrap();
        let sub = matches.subcommand_matches("new").unwrap();
        assert_eq!(sub.get_one::<String>("name").unwrap(), "svc");
        assert!(sub.get_flag("gh"));
        assert!(sub.get_flag("private"));
    }

    #[test]
    fn test_search_collects_all_terms() {
        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "search", "fn", "retry"])
            .unwrap();
        let sub = matches.subcommand_matches("search").unwrap();
        let terms: Vec<&String> = sub.get_many::<String>("terms").unwrap().collect();
        assert_eq!(terms, vec!["fn", "retry"]);

        assert!(build_cli().try_get_matches_from(vec!["roost", "search"]).is_err());
    }

    #[test]
    fn test_actions_default_workflow() {
        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "actions", "api"])
            .unwrap();
        let sub = matches.subcommand_matches("actions").unwrap();
        assert_eq!(sub.get_one::<String>("workflow").unwrap(), "deploy.yaml");

        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "actions", "api", "--workflow", "ci.yml"])
            .unwrap();
        let sub = matches.subcommand_matches("actions").unwrap();
        assert_eq!(sub.get_one::<String>("workflow").unwrap(), "ci.yml");
    }

    #[test]
    fn test_prs_branch_is_optional() {
        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "prs", "api", "-b", "feature-x", "--json"])
            .unwrap();
        let sub = matches.subcommand_matches("prs").unwrap();
        assert_eq!(sub.get_one::<String>("branch").unwrap(), "feature-x");
        assert!(sub.get_flag("json"));

        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "prs", "api"])
            .unwrap();
        let sub = matches.subcommand_matches("prs").unwrap();
        assert!(sub.get_one::<String>("branch").is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "active", "-w", "current", "-v"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("workspace").unwrap(), "current");
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_cache_requires_action() {
        assert!(build_cli().try_get_matches_from(vec!["roost", "cache"]).is_err());

        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "cache", "status", "--json"])
            .unwrap();
        let cache = matches.subcommand_matches("cache").unwrap();
        let status = cache.subcommand_matches("status").unwrap();
        assert!(status.get_flag("json"));
    }

    #[test]
    fn test_config_subcommands() {
        for action in ["init", "path"] {
            let matches = build_cli()
                .try_get_matches_from(vec!["roost", "config", action])
                .unwrap();
            let config = matches.subcommand_matches("config").unwrap();
            assert_eq!(config.subcommand_name(), Some(action));
        }
    }

    #[test]
    fn test_completions_rejects_unknown_shell() {
        assert!(
            build_cli()
                .try_get_matches_from(vec!["roost", "completions", "nushell-classic"])
                .is_err()
        );
        let matches = build_cli()
            .try_get_matches_from(vec!["roost", "completions", "zsh"])
            .unwrap();
        let sub = matches.subcommand_matches("completions").unwrap();
        assert_eq!(sub.get_one::<Shell>("shell"), Some(&Shell::Zsh));
    }
}
