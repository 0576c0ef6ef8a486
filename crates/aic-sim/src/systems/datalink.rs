//! Datalink identity resolution.
//!
//! Re-evaluated whenever the console network configuration, an asset's
//! datalink fit, or the roster changes; runs synchronously within the
//! mutating operation, never gated by the tick. Promotion is one-way: an
//! asset that leaves the network is marked inactive, but its identity and
//! track number are not reverted.

use hecs::World;

use aic_core::components::{AssetInfo, DatalinkFit, OwnShip, TrackLabel};
use aic_core::enums::Identity;
use aic_core::state::ConsoleDatalink;

/// A valid JU unit number is exactly five ASCII digits.
pub fn is_ju(code: &str) -> bool {
    code.len() == 5 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Common-network membership predicate. An asset is in datalink iff its NET
/// matches the console NET, it carries a valid JU, and both of its
/// track-block bounds are configured.
pub fn in_network(fit: &DatalinkFit, console_net: &str) -> bool {
    let net = console_net.trim();
    !net.is_empty()
        && fit.net.trim() == net
        && is_ju(&fit.ju)
        && fit.block_start.is_some()
        && fit.block_end.is_some()
}

/// True once the console NET, JU, and track block are all set; required
/// before any manual track report.
pub fn console_configured(console: &ConsoleDatalink) -> bool {
    !console.net.trim().is_empty()
        && is_ju(&console.ju)
        && console.block_start.is_some()
        && console.block_end.is_some()
}

/// Recompute datalink membership for the whole roster.
pub fn refresh(world: &mut World, console: &ConsoleDatalink) {
    let mut query = world
        .query::<(&mut AssetInfo, &mut DatalinkFit, &mut TrackLabel)>()
        .without::<&OwnShip>();
    for (_entity, (info, fit, label)) in query.iter() {
        if in_network(fit, &console.net) {
            info.identity = Identity::Friendly;
            fit.active = true;
            label.0 = Some(fit.ju.clone());
        } else if fit.active {
            // One-way promotion: only the active flag drops.
            fit.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(net: &str, ju: &str, block: Option<(u32, u32)>) -> DatalinkFit {
        DatalinkFit {
            net: net.to_string(),
            ju: ju.to_string(),
            block_start: block.map(|(s, _)| s),
            block_end: block.map(|(_, e)| e),
            active: false,
        }
    }

    #[test]
    fn test_is_ju() {
        assert!(is_ju("34567"));
        assert!(is_ju("00001"));
        assert!(!is_ju("3456"));
        assert!(!is_ju("345678"));
        assert!(!is_ju("3456a"));
        assert!(!is_ju(""));
    }

    #[test]
    fn test_in_network_predicate() {
        assert!(in_network(&fit("12", "34567", Some((6000, 6050))), "12"));
        // NET mismatch.
        assert!(!in_network(&fit("13", "34567", Some((6000, 6050))), "12"));
        // Whitespace-normalized equality.
        assert!(in_network(&fit(" 12 ", "34567", Some((6000, 6050))), "12"));
        // Missing JU or block.
        assert!(!in_network(&fit("12", "345", Some((6000, 6050))), "12"));
        assert!(!in_network(&fit("12", "34567", None), "12"));
        // Unconfigured console never matches.
        assert!(!in_network(&fit("", "34567", Some((6000, 6050))), ""));
    }

    #[test]
    fn test_console_configured() {
        let mut console = ConsoleDatalink::default();
        assert!(!console_configured(&console));

        console.net = "12".to_string();
        console.ju = "00100".to_string();
        console.block_start = Some(6000);
        console.block_end = Some(6050);
        assert!(console_configured(&console));

        console.ju = "1b345".to_string();
        assert!(!console_configured(&console));
    }
}
