use clap::Parser;
use todo_core::UserId;

#[derive(Parser, Debug)]
#[command(name = "todos")]
#[command(about = "Keep a remote todo list in the terminal", long_about = None)]
pub struct Cli {
    /// Base URL of the todo API
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    pub base_url: String,

    /// Owner of the todos (0 means not configured)
    #[arg(long, env = "TODO_USER_ID", default_value_t = 0)]
    pub user_id: u64,
}

impl Cli {
    pub fn user(&self) -> Option<UserId> {
        UserId::new(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_defaults_to_unconfigured() {
        let cli = Cli::try_parse_from(["todos", "--base-url", "http://x"]).unwrap();
        assert_eq!(cli.base_url, "http://x");
        if std::env::var_os("TODO_USER_ID").is_none() {
            assert!(cli.user().is_none());
        }
    }

    #[test]
    fn explicit_user_id() {
        let cli = Cli::try_parse_from(["todos", "--user-id", "1609"]).unwrap();
        assert_eq!(cli.user().map(UserId::get), Some(1609));
    }
}
