//! Operator CLI for a running divvi server: bootstrap users and groups,
//! record expenses, inspect balances.

use std::error::Error;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use api_types::expense::{ExpenseNew, SplitKind, WeightInput};
use api_types::group::GroupNew;
use api_types::user::UserNew;
use engine::MoneyCents;

mod api;

#[derive(Parser, Debug)]
#[command(name = "divvi_admin")]
#[command(about = "Admin utilities for divvi (users, groups, expenses, balances)")]
struct Cli {
    /// Base URL of the running server (also read from `DIVVI_API_URL`).
    #[arg(long, env = "DIVVI_API_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Group(Group),
    Expense(Expense),
    Balances(Balances),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
}

#[derive(Args, Debug)]
struct Group {
    #[command(subcommand)]
    command: GroupCommand,
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    Create(GroupCreateArgs),
    Show(GroupShowArgs),
}

#[derive(Args, Debug)]
struct GroupCreateArgs {
    #[arg(long)]
    name: String,
    /// Member id; repeat for every member.
    #[arg(long = "member", required = true)]
    members: Vec<Uuid>,
}

#[derive(Args, Debug)]
struct GroupShowArgs {
    #[arg(long)]
    id: Uuid,
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    Add(ExpenseAddArgs),
}

#[derive(Args, Debug)]
struct ExpenseAddArgs {
    #[arg(long)]
    group: Uuid,
    #[arg(long)]
    description: String,
    /// Decimal amount, e.g. `12.50`.
    #[arg(long)]
    amount: String,
    #[arg(long)]
    paid_by: Uuid,
    /// `equal` or `percentage`.
    #[arg(long, default_value = "equal", value_parser = parse_split)]
    split: SplitKind,
    /// Percentage weight as `<member_id>=<basis_points>`; repeat per member.
    #[arg(long = "weight", value_parser = parse_weight)]
    weights: Vec<WeightSpec>,
    /// Participant id; repeat to split among a subset only.
    #[arg(long = "participant")]
    participants: Vec<Uuid>,
}

#[derive(Args, Debug)]
struct Balances {
    #[command(subcommand)]
    command: BalancesCommand,
}

#[derive(Subcommand, Debug)]
enum BalancesCommand {
    Group(GroupShowArgs),
    User(UserShowArgs),
}

#[derive(Args, Debug)]
struct UserShowArgs {
    #[arg(long)]
    id: Uuid,
}

#[derive(Clone, Debug)]
struct WeightSpec {
    member_id: Uuid,
    weight_bp: u32,
}

fn parse_split(raw: &str) -> Result<SplitKind, String> {
    match raw {
        "equal" => Ok(SplitKind::Equal),
        "percentage" => Ok(SplitKind::Percentage),
        other => Err(format!("unsupported split kind: {other}")),
    }
}

fn parse_weight(raw: &str) -> Result<WeightSpec, String> {
    let (member, weight) = raw
        .split_once('=')
        .ok_or_else(|| "expected <member_id>=<basis_points>".to_string())?;
    let member_id = Uuid::from_str(member.trim()).map_err(|err| format!("bad member id: {err}"))?;
    let weight_bp = weight
        .trim()
        .parse()
        .map_err(|err| format!("bad basis points: {err}"))?;
    Ok(WeightSpec {
        member_id,
        weight_bp,
    })
}

fn money(minor: i64) -> MoneyCents {
    MoneyCents::new(minor)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let api = api::ApiClient::new(cli.server);

    match cli.command {
        Command::User(user) => match user.command {
            UserCommand::Create(args) => {
                let created = api
                    .user_create(&UserNew {
                        name: args.name,
                        email: args.email,
                    })
                    .await?;
                println!("{} {} <{}>", created.id, created.name, created.email);
            }
            UserCommand::List => {
                for user in api.user_list().await? {
                    println!("{} {} <{}>", user.id, user.name, user.email);
                }
            }
        },
        Command::Group(group) => match group.command {
            GroupCommand::Create(args) => {
                let created = api
                    .group_create(&GroupNew {
                        name: args.name,
                        member_ids: args.members,
                    })
                    .await?;
                println!("{} {}", created.id, created.name);
            }
            GroupCommand::Show(args) => {
                let details = api.group_show(args.id).await?;
                println!(
                    "{} ({} members, total spent {})",
                    details.name,
                    details.members.len(),
                    money(details.total_spent_minor)
                );
                for expense in &details.expenses {
                    println!(
                        "  {} {} {}",
                        expense.created_at.format("%Y-%m-%d"),
                        expense.description,
                        money(expense.amount_minor)
                    );
                }
            }
        },
        Command::Expense(expense) => match expense.command {
            ExpenseCommand::Add(args) => {
                let amount: MoneyCents = args.amount.parse()?;
                let weights = if args.weights.is_empty() {
                    None
                } else {
                    Some(
                        args.weights
                            .iter()
                            .map(|w| WeightInput {
                                member_id: w.member_id,
                                weight_bp: w.weight_bp,
                            })
                            .collect(),
                    )
                };
                let participants = if args.participants.is_empty() {
                    None
                } else {
                    Some(args.participants)
                };

                let created = api
                    .expense_add(
                        args.group,
                        &ExpenseNew {
                            description: args.description,
                            amount_minor: amount.cents(),
                            paid_by: args.paid_by,
                            split: args.split,
                            weights,
                            participants,
                        },
                    )
                    .await?;
                println!("{} {} {}", created.id, created.description, money(created.amount_minor));
            }
        },
        Command::Balances(balances) => match balances.command {
            BalancesCommand::Group(args) => {
                let response = api.group_balances(args.id).await?;
                for balance in &response.balances {
                    println!("{} net {}", balance.member_name, money(balance.net_minor));
                    for debt in &balance.owes_to {
                        println!("  owes {} to {}", money(debt.amount_minor), debt.member_name);
                    }
                    for credit in &balance.owed_by {
                        println!(
                            "  owed {} by {}",
                            money(credit.amount_minor),
                            credit.member_name
                        );
                    }
                }
            }
            BalancesCommand::User(args) => {
                let response = api.user_balances(args.id).await?;
                for group in &response.groups {
                    println!("{}: net {}", group.group_name, money(group.net_minor));
                }
                println!("total: {}", money(response.total_net_minor));
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_weight_accepts_id_equals_bp() {
        let id = Uuid::new_v4();
        let spec = parse_weight(&format!("{id}=3333")).unwrap();
        assert_eq!(spec.member_id, id);
        assert_eq!(spec.weight_bp, 3333);
    }

    #[test]
    fn parse_weight_rejects_garbage() {
        assert!(parse_weight("nonsense").is_err());
        assert!(parse_weight("not-a-uuid=10").is_err());
        assert!(parse_weight(&format!("{}=lots", Uuid::new_v4())).is_err());
    }

    #[test]
    fn parse_split_known_kinds_only() {
        assert_eq!(parse_split("equal").unwrap(), SplitKind::Equal);
        assert_eq!(parse_split("percentage").unwrap(), SplitKind::Percentage);
        assert!(parse_split("random").is_err());
    }
}
