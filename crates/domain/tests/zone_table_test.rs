mod helpers;

use helpers::builders::server;
use helpers::ZoneRuleBuilder;
use owns_dns_domain::{QueryContext, ZoneTable};
use std::net::IpAddr;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn split_horizon_table() -> ZoneTable {
    ZoneTable::new(vec![
        ZoneRuleBuilder::new()
            .network("192.168.1.0/24")
            .domain("home.lan")
            .server("udp://192.168.1.1")
            .build(),
        ZoneRuleBuilder::new()
            .network("10.0.0.0/8")
            .server("tcp://10.0.0.1:5353")
            .build(),
        ZoneRuleBuilder::new()
            .domain("example.com")
            .server("tls://9.9.9.9")
            .build(),
        ZoneRuleBuilder::new().server("udp://8.8.8.8:53").build(),
    ])
}

#[test]
fn test_forward_query_matches_domain_suffix() {
    let table = split_horizon_table();

    let servers = table.select_servers(QueryContext::Forward("www.example.com"));
    assert_eq!(servers, &[server("tls://9.9.9.9:853")]);

    let servers = table.select_servers(QueryContext::Forward("example.com"));
    assert_eq!(servers, &[server("tls://9.9.9.9:853")]);
}

#[test]
fn test_forward_query_does_not_match_partial_label() {
    let table = split_horizon_table();

    let servers = table.select_servers(QueryContext::Forward("notexample.com"));
    assert_eq!(servers, &[server("udp://8.8.8.8:53")]);
}

#[test]
fn test_forward_query_is_case_insensitive() {
    let table = split_horizon_table();

    let servers = table.select_servers(QueryContext::Forward("NAS.Home.LAN."));
    assert_eq!(servers, &[server("udp://192.168.1.1:53")]);
}

#[test]
fn test_reverse_query_matches_network_in_declaration_order() {
    let table = split_horizon_table();

    let servers = table.select_servers(QueryContext::Reverse(ip("192.168.1.20")));
    assert_eq!(servers, &[server("udp://192.168.1.1:53")]);

    let servers = table.select_servers(QueryContext::Reverse(ip("10.20.30.40")));
    assert_eq!(servers, &[server("tcp://10.0.0.1:5353")]);
}

#[test]
fn test_reverse_query_ignores_domains() {
    // The reverse name would never match a domain, and a domain-only zone never
    // matches an address.
    let table = split_horizon_table();

    let servers = table.select_servers(QueryContext::Reverse(ip("93.184.216.34")));
    assert_eq!(servers, &[server("udp://8.8.8.8:53")]);
}

#[test]
fn test_forward_query_ignores_networks() {
    let table = ZoneTable::new(vec![
        ZoneRuleBuilder::new()
            .network("0.0.0.0/0")
            .server("udp://10.0.0.1")
            .build(),
        ZoneRuleBuilder::new().server("udp://1.1.1.1").build(),
    ]);

    let servers = table.select_servers(QueryContext::Forward("anything.org"));
    assert_eq!(servers, &[server("udp://1.1.1.1:53")]);
}

#[test]
fn test_network_match_wins_over_later_domain_zone() {
    let table = ZoneTable::new(vec![
        ZoneRuleBuilder::new()
            .network("172.16.0.0/12")
            .server("udp://172.16.0.1")
            .build(),
        ZoneRuleBuilder::new()
            .domain("in-addr.arpa")
            .server("udp://9.9.9.9")
            .build(),
    ]);

    let servers = table.select_servers(QueryContext::Reverse(ip("172.16.5.5")));
    assert_eq!(servers, &[server("udp://172.16.0.1:53")]);
}

#[test]
fn test_ipv6_network_match() {
    let table = ZoneTable::new(vec![ZoneRuleBuilder::new()
        .network("fd00::/8")
        .server("udp://[fd00::1]:53")
        .build()]);

    let servers = table.select_servers(QueryContext::Reverse(ip("fd12:3456::1")));
    assert_eq!(servers, &[server("udp://[fd00::1]:53")]);
}

#[test]
fn test_multiple_default_zones_are_concatenated() {
    let table = ZoneTable::new(vec![
        ZoneRuleBuilder::new().server("udp://8.8.8.8").build(),
        ZoneRuleBuilder::new()
            .domain("corp")
            .server("udp://10.1.1.1")
            .build(),
        ZoneRuleBuilder::new()
            .server("udp://1.1.1.1")
            .server("udp://8.8.8.8")
            .build(),
    ]);

    assert_eq!(
        table.default_servers(),
        &[
            server("udp://8.8.8.8"),
            server("udp://1.1.1.1"),
            server("udp://8.8.8.8"),
        ]
    );
}

#[test]
fn test_root_domain_zone_does_not_join_defaults() {
    let table = ZoneTable::new(vec![
        ZoneRuleBuilder::new()
            .domain(".")
            .server("udp://10.9.9.9")
            .build(),
        ZoneRuleBuilder::new().server("udp://8.8.8.8").build(),
    ]);

    assert_eq!(table.default_servers(), &[server("udp://8.8.8.8")]);
    assert_eq!(
        table.select_servers(QueryContext::Forward("example.com")),
        &[server("udp://8.8.8.8")]
    );
}

#[test]
fn test_matched_zone_without_servers_falls_back_to_defaults() {
    let table = ZoneTable::new(vec![
        ZoneRuleBuilder::new().domain("empty.zone").build(),
        ZoneRuleBuilder::new().server("udp://8.8.8.8").build(),
    ]);

    let servers = table.select_servers(QueryContext::Forward("a.empty.zone"));
    assert_eq!(servers, &[server("udp://8.8.8.8")]);
}

#[test]
fn test_no_zones_selects_nothing() {
    let table = ZoneTable::new(vec![]);
    assert!(table
        .select_servers(QueryContext::Forward("example.com"))
        .is_empty());
}

#[test]
fn test_describe_lists_every_zone() {
    let table = split_horizon_table();
    let dump = table.describe();

    assert_eq!(dump.matches("* Servers:").count(), 4);
    assert!(dump.contains("192.168.1.0/24"));
    assert!(dump.contains("tls://9.9.9.9:853"));
    assert!(dump.contains("Domains: [example.com]"));
}
