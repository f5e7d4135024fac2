use crate::error::Result;
use crate::events::{DomainEvent, EventData, EventKind};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Display events in a markdown table
pub fn display_events(events: &[DomainEvent]) -> Result<()> {
    if events.is_empty() {
        println!("\nNo events found.\n");
        return Ok(());
    }

    println!("\n## GridMesh Events\n");

    #[derive(Tabled)]
    struct EventRow {
        #[tabled(rename = "Block")]
        block: String,
        #[tabled(rename = "Type")]
        kind: String,
        #[tabled(rename = "Transaction")]
        transaction: String,
        #[tabled(rename = "Details")]
        details: String,
    }

    let rows: Vec<EventRow> = events
        .iter()
        .map(|event| EventRow {
            block: event.block_number.to_string(),
            kind: event.kind.to_string(),
            transaction: truncate_hash(&event.transaction_hash),
            details: format_event_details(&event.data),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::markdown())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    println!("{table}\n");
    println!("**Total events:** {}\n", events.len());

    for kind in EventKind::all() {
        let count = events.iter().filter(|e| e.kind == kind).count();
        if count > 0 {
            println!("- **{kind}:** {count}");
        }
    }
    println!();

    Ok(())
}

/// Display a single live event as one line, for tailing
pub fn display_live_event(event: &DomainEvent) {
    println!(
        "[block {}] {} {} ({})",
        event.block_number,
        event.kind,
        format_event_details(&event.data),
        truncate_hash(&event.transaction_hash)
    );
}

fn format_event_details(data: &EventData) -> String {
    match data {
        EventData::NodeRegistered {
            node_address,
            name,
            capacity,
            ..
        } => format!(
            "node {} '{}' capacity {}",
            truncate_hash(node_address),
            name,
            capacity
        ),
        EventData::EnergyPurchased {
            buyer,
            seller,
            energy_amount,
            price,
        } => format!(
            "{} bought {} from {} at {}",
            truncate_hash(buyer),
            energy_amount,
            truncate_hash(seller),
            price
        ),
        EventData::AssetMinted {
            token_id,
            owner,
            asset_type,
            ..
        } => format!(
            "asset #{} ({}) to {}",
            token_id,
            asset_type,
            truncate_hash(owner)
        ),
        EventData::ProposalCreated {
            proposal_id,
            proposer,
            description,
            ..
        } => format!(
            "proposal #{} by {}: {}",
            proposal_id,
            truncate_hash(proposer),
            truncate_text(description, 40)
        ),
        EventData::TokenTransferred { from, to, value } => format!(
            "{} -> {}: {}",
            truncate_hash(from),
            truncate_hash(to),
            value
        ),
    }
}

/// Shorten a 0x-hash to its first and last 4 hex chars
fn truncate_hash(hash: &str) -> String {
    if hash.len() > 14 {
        format!("{}...{}", &hash[..10], &hash[hash.len() - 4..])
    } else {
        hash.to_string()
    }
}

fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let prefix: String = text.chars().take(max).collect();
        format!("{prefix}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_hash() {
        let hash = "0x1234567890abcdef1234567890abcdef12345678";
        assert_eq!(truncate_hash(hash), "0x12345678...5678");

        assert_eq!(truncate_hash("0xabc"), "0xabc");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 40), "short");
        let long = "a".repeat(50);
        assert_eq!(truncate_text(&long, 40), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn test_format_transfer_details() {
        let data = EventData::TokenTransferred {
            from: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
            to: "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".to_string(),
            value: "1000000000000000000".to_string(),
        };
        let details = format_event_details(&data);
        assert!(details.contains("1000000000000000000"));
        assert!(details.contains("->"));
    }

    #[test]
    fn test_display_events_empty_is_ok() {
        assert!(display_events(&[]).is_ok());
    }
}
