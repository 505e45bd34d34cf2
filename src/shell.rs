//! Terminal shell — drives an [`AppNavigator`] from line-oriented input.

use anyhow::{Context, bail};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::navigation::{NavOptions, RouteArgs, Screen};
use crate::navigator::AppNavigator;

const HELP: &str = "\
commands:
  go <route|path> [key=value ...] [--single-top]
  back                 pop the back-stack
  next | prev | skip   onboarding pager buttons
  stack                print the back-stack
  status               print the persisted onboarding flag
  reset                clear the onboarding flag
  help | quit";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Go {
        target: String,
        args: RouteArgs,
        single_top: bool,
    },
    Back,
    Next,
    Prev,
    Skip,
    Stack,
    Status,
    Reset,
    Help,
    Quit,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> anyhow::Result<ShellCommand> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("empty command");
    };

    let command = match verb {
        "go" => {
            let target = words.next().context("usage: go <route|path> [key=value ...]")?;
            let mut args = RouteArgs::new();
            let mut single_top = false;
            for word in words {
                if word == "--single-top" {
                    single_top = true;
                    continue;
                }
                let (key, value) = word
                    .split_once('=')
                    .with_context(|| format!("expected key=value, got `{word}`"))?;
                args.insert(key.to_string(), value.to_string());
            }
            ShellCommand::Go {
                target: target.to_string(),
                args,
                single_top,
            }
        }
        "back" | "up" => ShellCommand::Back,
        "next" => ShellCommand::Next,
        "prev" => ShellCommand::Prev,
        "skip" => ShellCommand::Skip,
        "stack" => ShellCommand::Stack,
        "status" => ShellCommand::Status,
        "reset" => ShellCommand::Reset,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "/quit" => ShellCommand::Quit,
        other => bail!("unknown command `{other}`, try `help`"),
    };
    Ok(command)
}

/// Interactive host around one navigator.
pub struct Shell {
    navigator: AppNavigator,
}

impl Shell {
    pub fn new(navigator: AppNavigator) -> Self {
        Self { navigator }
    }

    pub fn navigator(&self) -> &AppNavigator {
        &self.navigator
    }

    /// Apply a command and return the text to show.
    pub async fn execute(&mut self, command: ShellCommand) -> anyhow::Result<String> {
        let nav = &mut self.navigator;
        match command {
            ShellCommand::Go {
                target,
                args,
                single_top,
            } => {
                let options = NavOptions {
                    single_top,
                    ..NavOptions::default()
                };
                let outcome = if args.is_empty() && target.contains('/') {
                    nav.navigate_path(&target, options)?
                } else {
                    let screen = Screen::from_route_name(&target)
                        .with_context(|| format!("no route named `{target}`"))?;
                    nav.navigate(screen, args, options)?
                };
                if outcome.is_none() {
                    return Ok(format!("ignored invalid route; still at {}", nav.current()));
                }
            }
            ShellCommand::Back => {
                if !nav.navigate_up() {
                    return Ok(format!("already at root {}", nav.current()));
                }
            }
            ShellCommand::Next => {
                if nav.pager_next()?.is_none() {
                    return Ok("no onboarding pager on this screen".to_string());
                }
            }
            ShellCommand::Prev => {
                nav.pager_back();
            }
            ShellCommand::Skip => {
                if nav.pager_skip()?.is_none() {
                    return Ok("skip is not available here".to_string());
                }
            }
            ShellCommand::Stack => {
                return Ok(nav.back_stack().paths().join(" > "));
            }
            ShellCommand::Status => {
                let completed = nav.store().try_current().await?;
                return Ok(format!("onboarding_completed = {completed}"));
            }
            ShellCommand::Reset => {
                nav.store().reset().await?;
                return Ok("onboarding flag reset; takes effect on next launch".to_string());
            }
            ShellCommand::Help => return Ok(HELP.to_string()),
            ShellCommand::Quit => return Ok(String::new()),
        }
        Ok(self.describe())
    }

    /// Current screen, plus pager position on onboarding screens.
    pub fn describe(&self) -> String {
        let nav = &self.navigator;
        let mut out = format!("@ {}", nav.current());
        if let Some(pager) = nav.pager() {
            let page = pager.current_page();
            out.push_str(&format!(
                "\n  [{}/{}] {}\n  {}\n  ({}{})",
                pager.current_index() + 1,
                pager.pages().len(),
                page.spoken_title(),
                page.description,
                pager.primary_action_label(),
                if pager.can_skip() { ", skip" } else { "" },
            ));
        }
        out
    }

    /// Read commands until EOF or `quit`.
    pub async fn run<R>(&mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        println!("{}", self.describe());
        eprint!("> ");

        while let Some(line) = lines.next_line().await.context("reading stdin")? {
            let line = line.trim();
            if line.is_empty() {
                eprint!("> ");
                continue;
            }
            match parse_command(line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => match self.execute(command).await {
                    Ok(text) => println!("{text}"),
                    Err(e) => eprintln!("error: {e:#}"),
                },
                Err(e) => eprintln!("error: {e:#}"),
            }
            eprint!("> ");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{AppConfig, RoutePolicy};
    use crate::onboarding::OnboardingStore;
    use crate::store::MemoryPreferences;

    async fn shell() -> Shell {
        let store = Arc::new(OnboardingStore::new(Arc::new(MemoryPreferences::new())));
        let config = AppConfig {
            route_policy: RoutePolicy::Strict,
            debug_routes: true,
            ..AppConfig::default()
        };
        Shell::new(AppNavigator::launch(store, &config).await.unwrap())
    }

    #[test]
    fn parse_go_with_args() {
        let command = parse_command("go add_money name=Asha --single-top").unwrap();
        assert_eq!(
            command,
            ShellCommand::Go {
                target: "add_money".to_string(),
                args: crate::navigation::route_args([("name", "Asha")]),
                single_top: true,
            }
        );
    }

    #[test]
    fn parse_simple_verbs() {
        assert_eq!(parse_command("back").unwrap(), ShellCommand::Back);
        assert_eq!(parse_command("  skip ").unwrap(), ShellCommand::Skip);
        assert_eq!(parse_command("exit").unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn parse_errors() {
        assert!(parse_command("").is_err());
        assert!(parse_command("go").is_err());
        assert!(parse_command("go add_money Asha").is_err());
        assert!(parse_command("fly home").is_err());
    }

    #[tokio::test]
    async fn skip_then_navigate() {
        let mut shell = shell().await;
        assert!(shell.describe().contains("onboarding_flow"));

        let out = shell.execute(ShellCommand::Skip).await.unwrap();
        assert_eq!(out, "@ home");

        let out = shell
            .execute(parse_command("go metro_price/12345/200").unwrap())
            .await
            .unwrap();
        assert_eq!(out, "@ metro_price/12345/200");

        let out = shell.execute(ShellCommand::Stack).await.unwrap();
        assert_eq!(out, "home > metro_price/12345/200");
    }

    #[tokio::test]
    async fn invalid_route_reports_error() {
        let mut shell = shell().await;
        shell.execute(ShellCommand::Skip).await.unwrap();
        assert!(shell
            .execute(parse_command("go add_money").unwrap())
            .await
            .is_err());
        assert!(shell
            .execute(parse_command("go nowhere").unwrap())
            .await
            .is_err());
        assert_eq!(shell.navigator().back_stack().len(), 1);
    }

    #[tokio::test]
    async fn run_reads_until_quit() {
        let mut shell = shell().await;
        let input: &[u8] = b"next\nnext\nnext\nstack\nquit\ngo shop\n";
        shell.run(input).await.unwrap();
        assert_eq!(shell.navigator().current().path(), "home");
    }
}
