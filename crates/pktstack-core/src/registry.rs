//! Wire code to layer factory mapping.
//!
//! Codes are namespaced by [`Scope`]: a link-type value and an ether-type
//! value with the same number never resolve to each other's layer. The table
//! is built on first use and read-only afterwards, so lookups from several
//! threads need no locking.

use std::collections::HashMap;
use std::sync::LazyLock;

use etherparse::EtherType;
use pcap_parser::Linktype;
use tracing::trace;

use crate::layer::{Layer, LayerKind};

/// Numeric namespace a wire code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Capture link-layer header types (`LINKTYPE_*`).
    LinkType,
    /// Ether-type values carried in link-layer headers.
    EtherType,
}

/// Produces a zero-valued layer ready for `unpack`.
pub type LayerFactory = fn() -> Layer;

pub const LINKTYPE_ETHERNET: u16 = Linktype::ETHERNET.0 as u16;
pub const LINKTYPE_LINUX_SLL: u16 = Linktype::LINUX_SLL.0 as u16;

pub const ETHERTYPE_VLAN: u16 = EtherType::VLAN_TAGGED_FRAME.0;
pub const ETHERTYPE_SERVICE_VLAN: u16 = EtherType::PROVIDER_BRIDGING.0;
pub const ETHERTYPE_TRANSPARENT_BRIDGING: u16 = 0x6558;

const TABLE: &[(Scope, u16, LayerFactory)] = &[
    (Scope::LinkType, LINKTYPE_ETHERNET, new_ethernet),
    (Scope::LinkType, LINKTYPE_LINUX_SLL, new_sll),
    (Scope::EtherType, ETHERTYPE_VLAN, new_vlan),
    (Scope::EtherType, ETHERTYPE_SERVICE_VLAN, new_vlan),
    (Scope::EtherType, ETHERTYPE_TRANSPARENT_BRIDGING, new_ethernet),
];

static REGISTRY: LazyLock<HashMap<(Scope, u16), LayerFactory>> = LazyLock::new(|| {
    TABLE
        .iter()
        .map(|&(scope, code, factory)| ((scope, code), factory))
        .collect()
});

fn new_sll() -> Layer {
    LayerKind::Sll.empty()
}

fn new_ethernet() -> Layer {
    LayerKind::Ethernet.empty()
}

fn new_vlan() -> Layer {
    LayerKind::Vlan.empty()
}

/// Find the factory for `code` in `scope`.
///
/// `None` is not an error: it marks the end of the decodable chain.
///
/// # Examples
/// ```
/// use pktstack_core::{LayerKind, Scope, lookup};
///
/// let factory = lookup(Scope::LinkType, 113).expect("linux sll");
/// assert_eq!(factory().kind(), LayerKind::Sll);
/// assert!(lookup(Scope::EtherType, 113).is_none());
/// ```
pub fn lookup(scope: Scope, code: u16) -> Option<LayerFactory> {
    let found = REGISTRY.get(&(scope, code)).copied();
    trace!(?scope, code, found = found.is_some(), "registry lookup");
    found
}

/// Codes registered in `scope`, in ascending order.
pub fn registered_codes(scope: Scope) -> Vec<u16> {
    let mut codes: Vec<u16> = TABLE
        .iter()
        .filter(|(s, _, _)| *s == scope)
        .map(|&(_, code, _)| code)
        .collect();
    codes.sort_unstable();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_types_resolve() {
        let ethernet = lookup(Scope::LinkType, 1).unwrap();
        assert_eq!(ethernet().kind(), LayerKind::Ethernet);
        let sll = lookup(Scope::LinkType, 113).unwrap();
        assert_eq!(sll().kind(), LayerKind::Sll);
    }

    #[test]
    fn ether_types_resolve() {
        assert_eq!(lookup(Scope::EtherType, 0x8100).unwrap()().kind(), LayerKind::Vlan);
        assert_eq!(lookup(Scope::EtherType, 0x88a8).unwrap()().kind(), LayerKind::Vlan);
        assert_eq!(
            lookup(Scope::EtherType, 0x6558).unwrap()().kind(),
            LayerKind::Ethernet
        );
    }

    #[test]
    fn scopes_are_disjoint() {
        assert!(lookup(Scope::EtherType, LINKTYPE_ETHERNET).is_none());
        assert!(lookup(Scope::EtherType, LINKTYPE_LINUX_SLL).is_none());
        assert!(lookup(Scope::LinkType, ETHERTYPE_VLAN).is_none());
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(lookup(Scope::EtherType, EtherType::IPV4.0).is_none());
        assert!(lookup(Scope::LinkType, 0xffff).is_none());
    }

    #[test]
    fn factories_are_zero_valued() {
        let layer = lookup(Scope::LinkType, LINKTYPE_LINUX_SLL).unwrap()();
        assert_eq!(layer, LayerKind::Sll.empty());
    }

    #[test]
    fn lookup_from_many_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| lookup(Scope::EtherType, ETHERTYPE_VLAN).is_some()))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn registered_codes_are_sorted() {
        assert_eq!(registered_codes(Scope::LinkType), vec![1, 113]);
        assert_eq!(
            registered_codes(Scope::EtherType),
            vec![0x6558, 0x8100, 0x88a8]
        );
    }
}
