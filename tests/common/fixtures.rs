//! Static kernel log corpora used across harnesses.
//!
//! Lines follow the Ubuntu `kern.log` layout: syslog header, `kernel:`,
//! uptime stamp, module tag, interface, message.

/// WireGuard lines that each produce one record.
pub const CORPUS_RECORDS: &[&str] = &[
    "Jul 22 14:13:18 vpn-gw-1 kernel: [28341.470052] wireguard: wg0: Failed to give packet to userspace from peer 296 (90.253.165.83:51722)\n",
    "Jul 22 14:13:19 vpn-gw-1 kernel: [28342.118004] wireguard: wg0: Receiving handshake initiation from peer 123 (10.0.0.5:51820)\n",
    "Jul 22 14:13:19 vpn-gw-1 kernel: [28342.118090] wireguard: wg0: Sending handshake response to peer 123 (10.0.0.5:51820)\n",
    "Jul 22 14:13:25 vpn-gw-1 kernel: [28348.002311] wireguard: wg0: Zeroing out all keys for peer 045\n",
    "Jul 22 14:13:31 vpn-gw-1 kernel: [28354.771200] wireguard: wg0: Invalid handshake response from 109.201.133.24:3000\n",
    "Jul 22 14:13:40 vpn-gw-1 kernel: [28363.000007] wireguard: wg0: Interface created\n",
];

/// WireGuard lines that are skipped by the exclusion filter.
pub const CORPUS_KEYPAIR: &[&str] = &[
    "Jul 22 14:13:19 vpn-gw-1 kernel: [28342.118100] wireguard: wg0: Keypair 136090 destroyed for peer 264\n",
    "Jul 22 14:13:19 vpn-gw-1 kernel: [28342.118101] wireguard: wg0: Keypair 136091 created for peer 264\n",
];

/// Kernel lines from other modules.
pub const CORPUS_OTHER: &[&str] = &[
    "Jul 22 14:13:17 vpn-gw-1 kernel: [28340.000001] e1000e: eth0: NIC Link is Up 1000 Mbps Full Duplex, Flow Control: None\n",
    "Jul 22 14:13:20 vpn-gw-1 kernel: [28343.500000] audit: type=1400 audit(1595427200.123:42): apparmor=\"DENIED\" operation=\"open\"\n",
    "Jul 22 14:13:21 vpn-gw-1 kernel: [28344.250000] usb 1-1: new high-speed USB device number 3 using xhci_hcd\n",
];

/// Lines that fail extraction but must not stop a run.
pub const CORPUS_BROKEN: &[&str] = &[
    "Jul 22 14:13:18 vpn-gw-1 kernel:\n",
    "\n",
    "Jul 22 14:13:18 vpn-gw-1 kernel: [28341.470052] wireguard: wg0:\n",
    "Jxl 22 14:13:18 vpn-gw-1 kernel: [28341.470052] wireguard: wg0: Interface created\n",
];

/// Every corpus interleaved, in the order a real log would mix them.
pub fn corpus_mixed() -> Vec<&'static str> {
    let mut lines = Vec::new();
    let longest = [CORPUS_RECORDS.len(), CORPUS_KEYPAIR.len(), CORPUS_OTHER.len(), CORPUS_BROKEN.len()]
        .into_iter()
        .max()
        .unwrap_or(0);
    for i in 0..longest {
        for corpus in [CORPUS_OTHER, CORPUS_RECORDS, CORPUS_KEYPAIR, CORPUS_BROKEN] {
            if let Some(line) = corpus.get(i) {
                lines.push(*line);
            }
        }
    }
    lines
}

/// `n` synthetic lines cycling through the mixed corpus, for throughput and
/// ordering tests.
pub fn corpus_high_volume(n: usize) -> String {
    let mixed = corpus_mixed();
    let mut out = String::new();
    for i in 0..n {
        let line = mixed[i % mixed.len()];
        // vary the peer id so neighbouring records differ
        out.push_str(&line.replace("peer 296", &format!("peer {:03}", i % 1000)));
        if !line.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
