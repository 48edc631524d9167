use crate::domain::subnet::{covers, normalize, single_address};
use crate::domain::BanMap;
use crate::ports::BanManagerApi;
use crate::service::BanRegistry;
use ipnet::IpNet;
use std::net::IpAddr;

impl BanManagerApi for BanRegistry {
    fn ban(&self, subnet: IpNet, offset_secs: i64, since_epoch: bool) -> bool {
        let subnet = normalize(subnet);
        let now = self.now();
        let banned_until = self.resolve_expiry(offset_secs, since_epoch, now);

        if !self.state.lock().table.insert(subnet, banned_until, now) {
            tracing::debug!(
                subnet = %subnet,
                until = %banned_until,
                "[qc-ban] Ban already covered by broader entry"
            );
            return false;
        }

        tracing::debug!(subnet = %subnet, until = %banned_until, "[qc-ban] Banned subnet");
        self.notify();
        self.flush_logged();
        true
    }

    fn unban(&self, subnet: IpNet) -> bool {
        let subnet = normalize(subnet);
        if !self.state.lock().table.remove(&subnet) {
            return false;
        }

        tracing::debug!(subnet = %subnet, "[qc-ban] Unbanned subnet");
        self.notify();
        self.flush_logged();
        true
    }

    fn unban_address(&self, addr: IpAddr) -> bool {
        self.unban(single_address(addr))
    }

    fn unban_all_matching(&self, addr: IpAddr) -> usize {
        let removed = self.state.lock().table.remove_covering(&addr);
        if removed == 0 {
            return 0;
        }

        tracing::debug!(address = %addr, removed, "[qc-ban] Removed all bans covering address");
        self.notify();
        self.flush_logged();
        removed
    }

    fn clear(&self) {
        self.state.lock().table.clear();
        self.flush_logged();
        self.notify();
    }

    fn has_banned_overlap(&self, subnet: IpNet) -> bool {
        let now = self.now();
        self.state.lock().table.contains_overlap(&subnet, now)
    }

    fn is_banned(&self, addr: IpAddr) -> bool {
        let now = self.now();
        self.state.lock().table.covers_address(&addr, now)
    }

    fn is_subnet_banned(&self, subnet: IpNet) -> bool {
        let now = self.now();
        self.state.lock().table.contains_exact(&subnet, now)
    }

    fn discourage(&self, addr: IpAddr) {
        self.state.lock().discouraged.discourage(&addr);
    }

    fn is_discouraged(&self, addr: IpAddr) -> bool {
        self.state.lock().discouraged.is_discouraged(&addr)
    }

    fn export_snapshot(&self) -> BanMap {
        let now = self.now();
        let (bans, swept) = self.state.lock().table.snapshot(now);
        if swept > 0 {
            self.notify();
        }
        bans
    }

    fn relevant_bans(&self, addr: IpAddr) -> BanMap {
        self.export_snapshot()
            .into_iter()
            .filter(|(subnet, _)| covers(subnet, &addr))
            .collect()
    }
}
