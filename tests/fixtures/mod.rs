//! Route-trace captures shared by the integration tests

#![allow(dead_code)]

/// Linux `traceroute` with resolved names, an ASN, an annotation and a silent hop
pub const LINUX: &str = "traceroute to example.com (93.184.216.34), 30 hops max, 60 byte packets
 1  _gateway (192.168.1.1)  0.512 ms  0.455 ms  0.421 ms
 2  10.10.0.1 (10.10.0.1)  8.123 ms  8.101 ms  8.090 ms
 3  * * *
 4  ae-2.r21.frnkge08.de.bb.gin.ntt.net (129.250.3.1)  15.331 ms ae-3.r21.frnkge08.de.bb.gin.ntt.net (129.250.3.2)  15.210 ms  15.198 ms
 5  [AS15133] 93.184.216.34 (93.184.216.34)  21.004 ms !H  20.998 ms  21.100 ms
";

/// Same path as [`LINUX`] where hop 4 moved to another router and hop 2 slowed down
pub const LINUX_REROUTED: &str = "traceroute to example.com (93.184.216.34), 30 hops max, 60 byte packets
 1  _gateway (192.168.1.1)  0.498 ms  0.470 ms  0.433 ms
 2  10.10.0.1 (10.10.0.1)  48.500 ms  47.912 ms  48.001 ms
 3  * * *
 4  ae-7.r22.frnkge08.de.bb.gin.ntt.net (129.250.4.9)  15.402 ms  15.388 ms  15.377 ms
 5  [AS15133] 93.184.216.34 (93.184.216.34)  21.221 ms !H  21.087 ms  21.310 ms
";

/// Linux `traceroute` where one hop stopped answering
pub const LINUX_TIMEOUT: &str = "traceroute to example.com (93.184.216.34), 30 hops max, 60 byte packets
 1  _gateway (192.168.1.1)  0.512 ms  0.455 ms  0.421 ms
 2  * * *
 3  * * *
 4  ae-2.r21.frnkge08.de.bb.gin.ntt.net (129.250.3.1)  15.331 ms  15.210 ms  15.198 ms
 5  [AS15133] 93.184.216.34 (93.184.216.34)  21.004 ms !H  20.998 ms  21.100 ms
";

/// Windows `tracert`, addresses only for most hops
pub const WINDOWS: &str = "
Tracing route to example.com [93.184.216.34]
over a maximum of 30 hops:

  1    <1 ms    <1 ms    <1 ms  192.168.1.1
  2     8 ms     7 ms     8 ms  10.10.0.1
  3     *        *        *     Request timed out.
  4    15 ms    16 ms    15 ms  ae-2.r21.ntt.net [129.250.3.1]
  5    21 ms    20 ms    21 ms  93.184.216.34

Trace complete.
";

/// Windows `tracert` over IPv6
pub const WINDOWS_IPV6: &str = "
Tracing route to ipv6.example.com [2606:2800:220:1:248:1893:25c8:1946]
over a maximum of 30 hops:

  1     1 ms     1 ms     1 ms  2a01:e35:8bd9:8bb0::1
  2    20 ms    19 ms    20 ms  2a01:e00:2:1::1
  3    22 ms    22 ms    21 ms  2606:2800:220:1:248:1893:25c8:1946

Trace complete.
";

/// Linux `traceroute6`
pub const LINUX_IPV6: &str = "traceroute to ipv6.example.com (2606:2800:220:1:248:1893:25c8:1946), 30 hops max, 80 byte packets
 1  router.lan (2a01:e35:8bd9:8bb0::1)  1.021 ms  0.990 ms  0.967 ms
 2  2a01:e00:2:1::1 (2a01:e00:2:1::1)  19.870 ms  19.802 ms  19.799 ms
";

/// Output of a failed probe run
pub const NOT_FOUND: &str = "sh: 1: traceroute: not found\n";
