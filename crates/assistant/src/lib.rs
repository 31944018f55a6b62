//! Natural-language query assistant.
//!
//! Answers questions about balances, recent expenses and totals. The
//! assistant only reads already-computed views handed to it as a
//! [`LedgerDigest`]; it never recomputes money. When a remote
//! text-generation endpoint is configured it is tried first and any failure
//! falls back to the deterministic rule-based summaries, so the endpoint is
//! strictly optional.

use engine::MoneyCents;

pub use inference::InferenceConfig;
use inference::InferenceClient;

mod inference;

/// Snapshot of the ledger state the assistant may talk about, built by the
/// caller from the same views the balance endpoints serve.
#[derive(Clone, Debug, Default)]
pub struct LedgerDigest {
    pub stats: api_types::chat::ChatStats,
    pub groups: Vec<GroupDigest>,
}

#[derive(Clone, Debug)]
pub struct GroupDigest {
    pub name: String,
    pub total_spent_minor: i64,
    pub balances: Vec<api_types::balance::MemberBalanceView>,
}

pub struct Assistant {
    inference: Option<InferenceClient>,
}

impl Assistant {
    /// Builds an assistant; with `None` it answers rule-based only.
    pub fn new(config: Option<InferenceConfig>) -> Result<Self, reqwest::Error> {
        let inference = match config {
            Some(config) => Some(InferenceClient::new(config)?),
            None => None,
        };
        Ok(Self { inference })
    }

    /// Answers one query against the digest.
    pub async fn reply(&self, query: &str, digest: &LedgerDigest) -> String {
        if let Some(client) = &self.inference {
            let prompt = build_prompt(query, digest);
            match client.generate(&prompt).await {
                Ok(text) => return text,
                Err(err) => {
                    tracing::warn!("inference failed, using rule-based answer: {err}");
                }
            }
        }

        rule_based_reply(query, digest)
    }
}

/// Prompt for the remote model: the digest rendered as plain text, then the
/// user's question.
fn build_prompt(query: &str, digest: &LedgerDigest) -> String {
    let mut prompt = String::from("You are an assistant for a shared-expense tracker.\n");
    prompt.push_str(&summarize_balances(digest));
    prompt.push('\n');
    prompt.push_str(&summarize_totals(digest));
    prompt.push_str("\nQuestion: ");
    prompt.push_str(query);
    prompt.push_str("\nAnswer briefly using only the data above.");
    prompt
}

fn rule_based_reply(query: &str, digest: &LedgerDigest) -> String {
    let lowered = query.to_lowercase();

    if lowered.contains("balance") || lowered.contains("owe") {
        summarize_balances(digest)
    } else if lowered.contains("expense") || lowered.contains("recent") || lowered.contains("latest")
    {
        summarize_recent(digest)
    } else if lowered.contains("total") {
        summarize_totals(digest)
    } else {
        HELP_TEXT.to_string()
    }
}

const HELP_TEXT: &str = "I can answer questions about your shared expenses:\n\
  - \"What are the current balances?\"\n\
  - \"Show me recent expenses\"\n\
  - \"What's the total spent?\"";

fn money(minor: i64) -> String {
    MoneyCents::new(minor).to_string()
}

fn summarize_balances(digest: &LedgerDigest) -> String {
    let mut out = String::from("Current balances:\n");
    let mut any = false;

    for group in &digest.groups {
        let unsettled: Vec<_> = group
            .balances
            .iter()
            .filter(|b| b.net_minor != 0)
            .collect();
        if unsettled.is_empty() {
            continue;
        }
        any = true;
        out.push_str(&format!("{}:\n", group.name));
        for balance in unsettled {
            if balance.net_minor < 0 {
                out.push_str(&format!(
                    "  - {} owes {}\n",
                    balance.member_name,
                    money(-balance.net_minor)
                ));
            } else {
                out.push_str(&format!(
                    "  - {} is owed {}\n",
                    balance.member_name,
                    money(balance.net_minor)
                ));
            }
        }
    }

    if any {
        out
    } else {
        "Everyone is settled up.".to_string()
    }
}

fn summarize_recent(digest: &LedgerDigest) -> String {
    if digest.stats.recent_expenses.is_empty() {
        return "No expenses recorded yet.".to_string();
    }

    let mut out = String::from("Recent expenses:\n");
    for expense in &digest.stats.recent_expenses {
        out.push_str(&format!(
            "  - {}: {} paid by {} in {}\n",
            expense.description,
            money(expense.amount_minor),
            expense.paid_by_name,
            expense.group_name
        ));
    }
    out
}

fn summarize_totals(digest: &LedgerDigest) -> String {
    let total: i64 = digest.groups.iter().map(|g| g.total_spent_minor).sum();
    let mut out = format!("Total spent across all groups: {}\n", money(total));
    for group in &digest.groups {
        out.push_str(&format!(
            "  - {}: {}\n",
            group.name,
            money(group.total_spent_minor)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::balance::MemberBalanceView;
    use uuid::Uuid;

    fn digest() -> LedgerDigest {
        LedgerDigest {
            stats: api_types::chat::ChatStats {
                total_users: 2,
                total_groups: 1,
                total_expenses: 1,
                recent_expenses: vec![api_types::chat::RecentExpense {
                    description: "Dinner".to_string(),
                    amount_minor: 4200,
                    group_name: "Trip".to_string(),
                    paid_by_name: "Alice".to_string(),
                    created_at: chrono::Utc::now(),
                }],
            },
            groups: vec![GroupDigest {
                name: "Trip".to_string(),
                total_spent_minor: 4200,
                balances: vec![
                    MemberBalanceView {
                        member_id: Uuid::new_v4(),
                        member_name: "Alice".to_string(),
                        owes_to: Vec::new(),
                        owed_by: Vec::new(),
                        net_minor: 2100,
                    },
                    MemberBalanceView {
                        member_id: Uuid::new_v4(),
                        member_name: "Bob".to_string(),
                        owes_to: Vec::new(),
                        owed_by: Vec::new(),
                        net_minor: -2100,
                    },
                ],
            }],
        }
    }

    #[test]
    fn balance_queries_list_debts() {
        let reply = rule_based_reply("what are the balances?", &digest());
        assert!(reply.contains("Alice is owed $21.00"));
        assert!(reply.contains("Bob owes $21.00"));
    }

    #[test]
    fn expense_queries_list_recent() {
        let reply = rule_based_reply("show recent expenses", &digest());
        assert!(reply.contains("Dinner"));
        assert!(reply.contains("$42.00"));
        assert!(reply.contains("Alice"));
    }

    #[test]
    fn total_queries_sum_groups() {
        let reply = rule_based_reply("how much in total?", &digest());
        assert!(reply.contains("Total spent across all groups: $42.00"));
        assert!(reply.contains("Trip: $42.00"));
    }

    #[test]
    fn unknown_queries_get_help() {
        let reply = rule_based_reply("sing me a song", &digest());
        assert_eq!(reply, HELP_TEXT);
    }

    #[test]
    fn settled_digest_says_settled() {
        let mut digest = digest();
        for balance in &mut digest.groups[0].balances {
            balance.net_minor = 0;
        }
        let reply = rule_based_reply("balances", &digest);
        assert_eq!(reply, "Everyone is settled up.");
    }
}
