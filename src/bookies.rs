// src/bookies.rs
//! Built-in targets.
//!
//! Most sites share one check: the page title mentions the site and a
//! known structural element is present. Those are registered as
//! [`TitleAndStructure`] targets. Sites with a full selector map come in
//! through YAML (see `config::target_config`) or [`sportsbook_tree`].

use crate::core::html::Document;
use crate::engine::tree::{SelectorNode, SelectorTree};
use crate::engine::types::VerificationResult;
use crate::registry::{CustomVerifier, Registry, Target};

/// Site keys registered with the title/structure check.
pub const TITLE_CHECKED: &[&str] = &[
    "1xbet", "22bet", "888starz", "bangbet", "betafriq", "betbureau", "betflame",
    "betgr8", "betika", "betkwiff", "betpawa", "betsafe", "betwinner", "bongobongo",
    "dafabet", "helabet", "hollywoodbets", "inbetkenya", "instabets", "jambobet",
    "jantabets", "kwachua", "kwikbet", "ligibet", "mcheza", "megapari", "mossbets",
    "mozzartbet", "palmsbet", "pesacrash", "pinnacle", "pitch90bet", "playbet",
    "shabiki", "solbet", "sportybet",
];

/// Page title must contain the target name (case-insensitive), and either
/// `<body class="main-page">` or any `.header` must exist.
#[derive(Clone, Debug, Default)]
pub struct TitleAndStructure;

impl CustomVerifier for TitleAndStructure {
    fn verify(&self, target: &Target, doc: &Document) -> Vec<VerificationResult> {
        let title = doc.title().to_lowercase();
        let title_ok = !target.name().is_empty() && title.contains(target.name());

        let structure_ok =
            doc.first_has_class("body", "main-page") || doc.exists(".header").unwrap_or(false);

        vec![
            VerificationResult::new("Title contains name", title_ok),
            VerificationResult::new("Structural element", structure_ok),
        ]
    }
}

/// Register every built-in target. Later registrations of the same name
/// (e.g. from YAML) replace these.
pub fn register_builtin(registry: &mut Registry) {
    for name in TITLE_CHECKED {
        registry.register(Target::custom(name, TitleAndStructure));
    }
    logd!("registered {} built-in target(s)", TITLE_CHECKED.len());
}

fn group<const N: usize>(leaves: [(&str, &str); N]) -> SelectorNode {
    SelectorNode::branch(leaves.map(|(name, sel)| (name, SelectorNode::leaf(sel))))
}

/// Default selector layout for a full sportsbook front page.
pub fn sportsbook_tree() -> SelectorTree {
    let selectors = SelectorNode::branch([
        ("Login", group([
            ("UsernameInput", "input#username"),
            ("PasswordInput", "input#password"),
            ("LoginButton", "button#login"),
        ])),
        ("Session", group([
            ("LogoutButton", "button#logout"),
            ("SessionUserInfo", "div#userInfo"),
        ])),
        ("EventSearch", group([
            ("SportDropdown", "select#sport"),
            ("DatePicker", "input#date"),
            ("SearchButton", "button#search"),
            ("EventResults", "div#eventResults"),
            ("EventItem", "div.event-item"),
            ("EventTitle", "div.event-title"),
            ("EventTeam", "div.event-team"),
        ])),
        ("OddsSelector", group([
            ("Moneyline", "div.match-result"),
            ("Spread", "div.over-under"),
            ("Totals", "div.point-spread"),
            ("OddsDropdown", "select#odds"),
        ])),
        ("BetSlip", group([
            ("AddButton", "button#addToBetSlip"),
            ("RemoveButton", "button#removeBetSlipItem"),
            ("StakeInput", "input#stake"),
            ("CalculateButton", "button#calculate"),
            ("ClearButton", "button#clearBetSlip"),
            ("PotentialPayout", "div#potentialPayout"),
            ("BetSlipItem", "div.bet-slip-item"),
        ])),
        ("LiveBetting", group([
            ("LiveBettingButton", "button#liveBetting"),
            ("OddsChangeIndicator", "div.odds-change-indicator"),
            ("LiveEventItem", "div.live-event-item"),
            ("LiveScore", "div.live-score"),
            ("LiveOddSelector", "div.live-odd-selector"),
            ("LiveEvent", "div.live-event"),
            ("InPlayBetButton", ""),
        ])),
        ("LineMovement", group([
            ("LineChangeIndicator", "div.line-change-indicator"),
            ("OddsHistory", "div.odds-history"),
            ("BettingLines", "div.betting-lines"),
        ])),
        ("FilterOptions", group([
            ("SportDropdown", "select#sportFilter"),
            ("MarketTypeDropdown", "select#marketTypeFilter"),
            ("TimeFilter", "input#timeFilter"),
            ("ResetFiltersButton", "button#resetFilters"),
        ])),
        ("BetConfirmation", group([
            ("ConfirmButton", "button#confirmBet"),
            ("ErrorMessage", "div#errorMessage"),
            ("SuccessMessage", "div#successMessage"),
            ("BetSummary", "div#betSummary"),
        ])),
        ("BetHistory", group([
            ("HistoryPageLink", "a#betHistoryLink"),
            ("BetRowSelector", "div.bet-row"),
            ("EventColumn", "div.bet-row .event"),
            ("StakeColumn", "div.bet-row .stake"),
            ("OutcomeColumn", "div.bet-row .outcome"),
            ("FilterByResult", "select#filterByResult"),
            ("FilterByMarket", "select#filterByMarket"),
        ])),
        ("Promotions", group([
            ("PromotionBanner", "div#promotionBanner"),
            ("RedeemButton", "button#redeemPromo"),
            ("PromoCodeInput", "input#promoCode"),
            ("ApplyPromoButton", "button#applyPromo"),
        ])),
        ("CashOut", group([
            ("CashOutButton", "button#cashOut"),
            ("OpenBet", "div.open-bet"),
            ("CancellableBetIndicator", "div.cancellable-bet"),
            ("CashoutOffer", "div.cashout-offer"),
            ("ConfirmCashoutButton", "button#confirmCashout"),
        ])),
        ("NotificationCenter", group([
            ("NotificationPopup", "div#notificationPopup"),
            ("DismissButton", "button#dismissNotification"),
            ("NotificationMessage", "div.notification-message"),
            ("NotificationType", "div.notification-type"),
        ])),
    ]);

    SelectorTree::new(selectors)
        .with_top_level("BetButton", "button#placeBet")
        .with_top_level("BetHistory", "div#betHistory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_structure_checks() {
        let target = Target::custom("betika", TitleAndStructure);
        let ok = Document::parse(
            r#"<html><head><title>Betika | Kenya</title></head><body><div class="header"></div></body></html>"#,
        );
        let results = TitleAndStructure.verify(&target, &ok);
        assert!(results.iter().all(|r| r.passed()));

        let bad = Document::parse("<html><head><title>Other</title></head><body></body></html>");
        let results = TitleAndStructure.verify(&target, &bad);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.passed()));
    }

    #[test]
    fn builtins_are_registered_by_key() {
        let mut reg = Registry::new();
        register_builtin(&mut reg);
        assert_eq!(reg.len(), TITLE_CHECKED.len());
        assert!(reg.lookup("SportyBet").is_some());
    }

    #[test]
    fn sportsbook_tree_is_well_formed() {
        let tree = sportsbook_tree();
        assert!(tree.selectors.validate().is_ok());
        // one unconfigured leaf (LiveBetting.InPlayBetButton)
        assert_eq!(tree.selectors.configured_leaves(), 60);
        assert_eq!(tree.top_level.len(), 2);
    }
}
