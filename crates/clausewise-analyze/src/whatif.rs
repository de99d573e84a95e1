//! Heuristic "what-if" impact notes.
//!
//! A hypothetical is routed to one clause bucket by keyword. Rules are checked
//! in a fixed order and the first rule with a matching keyword decides, even
//! when its bucket turns out to be empty.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clauses::{extract_clauses, ClauseBuckets, ClauseKind};

/// Maximum number of clause snippets quoted per hypothetical.
pub const MAX_SNIPPETS: usize = 5;

/// Returned when no bucket applies or the chosen bucket is empty.
pub const GENERIC_ANALYSIS: &str = "Based on the current clauses, the hypothetical change may \
    affect the above terms. Review obligations, exceptions, and notice requirements.";

/// Routing rules, highest priority first. Reordering changes results.
pub const WHATIF_RULES: &[(ClauseKind, &[&str])] = &[
    (
        ClauseKind::Payment,
        &["pay", "fee", "amount", "price", "invoice", "compensation"],
    ),
    (
        ClauseKind::Termination,
        &["terminat", "extend", "renew", "notice", "breach"],
    ),
    (
        ClauseKind::Liability,
        &["liability", "indemn", "damages", "cap"],
    ),
    (
        ClauseKind::Confidentiality,
        &["confidential", "nda", "secret", "non-disclosure"],
    ),
    (
        ClauseKind::Jurisdiction,
        &["jurisdiction", "governing law", "court", "arbitration", "forum"],
    ),
    (ClauseKind::Ip, &["ip", "license", "ownership", "assign"]),
];

/// One analyzed hypothetical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatIfItem {
    pub hypothetical: String,
    pub analysis: String,
}

/// Bucket a hypothetical is about, if any keyword matches.
pub fn route_hypothetical(hypothetical: &str) -> Option<ClauseKind> {
    let lower = hypothetical.to_lowercase();
    WHATIF_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(kind, _)| *kind)
}

/// Compose the analysis text for one hypothetical against classified clauses.
pub fn analyze_hypothetical(hypothetical: &str, clauses: &ClauseBuckets) -> String {
    let relevant = route_hypothetical(hypothetical)
        .map(|kind| clauses.get(kind))
        .unwrap_or(&[]);

    if relevant.is_empty() {
        return GENERIC_ANALYSIS.to_string();
    }

    let take = relevant.len().min(MAX_SNIPPETS);
    let snippet = relevant[..take].join("\n- ");
    format!(
        "Likely affected clauses (snippets):\n- {}\n\nImpact (heuristic): {} could trigger \
         renegotiation duties, require written amendments, or change risk allocation. \
         Check conflict/residual clauses.",
        snippet, hypothetical
    )
}

/// Analyze each hypothetical against `text`, preserving input order.
///
/// The document is classified once for the whole batch.
pub fn heuristic_whatif(text: &str, hypotheticals: &[String]) -> Vec<WhatIfItem> {
    if hypotheticals.is_empty() {
        return Vec::new();
    }

    let clauses = extract_clauses(text);
    debug!(
        "Heuristic what-if: {} hypotheticals, {} classified sentences",
        hypotheticals.len(),
        clauses.total()
    );

    hypotheticals
        .iter()
        .map(|h| WhatIfItem {
            hypothetical: h.clone(),
            analysis: analyze_hypothetical(h, &clauses),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "Fees shall be paid within 30 days of invoice. \
        Either party may terminate this Agreement for material breach. \
        The Supplier shall indemnify the Customer against third party claims. \
        This Agreement is governed by the laws of England.";

    fn hypos(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_hypotheticals() {
        assert!(heuristic_whatif(CONTRACT, &[]).is_empty());
    }

    #[test]
    fn test_payment_hypothetical_quotes_payment_clause() {
        let result = heuristic_whatif(CONTRACT, &hypos(&["What if the payment terms change?"]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].hypothetical, "What if the payment terms change?");
        assert!(result[0]
            .analysis
            .starts_with("Likely affected clauses (snippets):\n- Fees shall be paid within 30 days of invoice."));
        assert!(result[0]
            .analysis
            .contains("Impact (heuristic): What if the payment terms change? could trigger"));
    }

    #[test]
    fn test_order_and_count_match_input() {
        let input = hypos(&[
            "What if we terminate early?",
            "What if the weather is bad?",
            "What if damages are uncapped?",
        ]);
        let result = heuristic_whatif(CONTRACT, &input);
        let returned: Vec<&str> = result.iter().map(|r| r.hypothetical.as_str()).collect();
        assert_eq!(returned, vec![
            "What if we terminate early?",
            "What if the weather is bad?",
            "What if damages are uncapped?",
        ]);
        assert!(result[0].analysis.contains("material breach"));
        assert_eq!(result[1].analysis, GENERIC_ANALYSIS);
        assert!(result[2].analysis.contains("indemnify the Customer"));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "fee" (payment) outranks "terminat" (termination).
        assert_eq!(
            route_hypothetical("Terminate and refund the fee"),
            Some(ClauseKind::Payment)
        );
        assert_eq!(
            route_hypothetical("Renewal notice is shortened"),
            Some(ClauseKind::Termination)
        );
        assert_eq!(route_hypothetical("Move the COURT to Paris"), Some(ClauseKind::Jurisdiction));
        assert_eq!(route_hypothetical("Who owns it?"), None);
    }

    #[test]
    fn test_empty_winning_bucket_gives_generic_note() {
        // Routed to confidentiality, which has no sentences in CONTRACT.
        let result = heuristic_whatif(CONTRACT, &hypos(&["What if the NDA is void?"]));
        assert_eq!(result[0].analysis, GENERIC_ANALYSIS);
    }

    #[test]
    fn test_snippets_capped_at_five() {
        let text = (1..=7)
            .map(|i| format!("Invoice number {} is payable.", i))
            .collect::<Vec<_>>()
            .join(" ");
        let result = heuristic_whatif(&text, &hypos(&["What if the price rises?"]));
        let bullets = result[0].analysis.matches("\n- ").count();
        assert_eq!(bullets, MAX_SNIPPETS);
        assert!(result[0].analysis.contains("Invoice number 5 is payable."));
        assert!(!result[0].analysis.contains("Invoice number 6 is payable."));
    }
}
