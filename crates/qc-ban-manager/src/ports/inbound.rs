//! # Driving Ports (Inbound API)
//!
//! The API connection admission, misbehavior handling and RPC use to
//! query and mutate the ban list.

use crate::domain::BanMap;
use ipnet::IpNet;
use std::net::IpAddr;

/// Primary API of the ban manager.
///
/// Every method takes `&self` and is safe to call concurrently; each call
/// is atomic with respect to every other.
///
/// # Example
///
/// ```rust,ignore
/// use qc_ban_manager::ports::BanManagerApi;
///
/// fn admit<T: BanManagerApi>(bans: &T, peer: std::net::IpAddr) -> bool {
///     !bans.is_banned(peer)
/// }
/// ```
pub trait BanManagerApi {
    /// Ban a subnet.
    ///
    /// A non-positive `offset_secs` selects the configured default
    /// duration relative to now, ignoring `since_epoch`. Otherwise
    /// `since_epoch` treats the offset as an absolute unix time.
    ///
    /// Returns `false` if an existing broader-or-equal ban already covers
    /// the range for at least as long.
    fn ban(&self, subnet: IpNet, offset_secs: i64, since_epoch: bool) -> bool;

    /// Remove the ban with exactly this subnet.
    fn unban(&self, subnet: IpNet) -> bool;

    /// Remove the exact-match ban for a single address.
    fn unban_address(&self, addr: IpAddr) -> bool;

    /// Remove every ban whose range contains `addr`. Returns how many.
    fn unban_all_matching(&self, addr: IpAddr) -> usize;

    /// Drop every ban.
    fn clear(&self);

    /// True iff an unexpired ban overlaps `subnet` in either direction.
    fn has_banned_overlap(&self, subnet: IpNet) -> bool;

    /// True iff an unexpired ban covers `addr`.
    fn is_banned(&self, addr: IpAddr) -> bool;

    /// True iff an unexpired ban exists for exactly this subnet.
    fn is_subnet_banned(&self, subnet: IpNet) -> bool;

    /// Mark an address as discouraged.
    fn discourage(&self, addr: IpAddr);

    /// Exact-address discourage check.
    fn is_discouraged(&self, addr: IpAddr) -> bool;

    /// Swept copy of the ban table.
    fn export_snapshot(&self) -> BanMap;

    /// Swept copy limited to bans covering `addr`.
    fn relevant_bans(&self, addr: IpAddr) -> BanMap;
}
