//! Integration tests for cidr-algebra
//!
//! These tests exercise the public API end to end, from text input to
//! summarized and split listings.

use cidr_algebra::{
    compress, expand, output, valid, AddressClass, CidrError, Cidr, Family, Ipv4, Ipv6,
    Ipv6Mapped, Network,
};
use std::io::Write;

fn nets(texts: &[&str]) -> Vec<Network> {
    texts.iter().map(|t| Network::parse(t).unwrap()).collect()
}

fn texts(list: &[Network]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_summarize_sibling_pair() {
    let result = Network::summarize(&nets(&["172.16.10.0/24", "172.16.11.0/24"])).unwrap();
    assert_eq!(texts(&result), ["172.16.10.0/23"]);
}

#[test]
fn test_summarize_unaligned_hosts() {
    let result = Network::summarize(&nets(&[
        "10.0.1.1/24",
        "10.0.2.1/24",
        "10.0.3.1/24",
        "10.0.4.1/24",
    ]))
    .unwrap();
    assert_eq!(
        texts(&result),
        ["10.0.1.0/24", "10.0.2.0/23", "10.0.4.0/24"]
    );
}

#[test]
fn test_split_into_three() {
    let net = Network::parse("172.16.10.0/24").unwrap();
    assert_eq!(
        texts(&net.split(3).unwrap()),
        ["172.16.10.0/26", "172.16.10.64/26", "172.16.10.128/25"]
    );
}

#[test]
fn test_host_route_ranges() {
    let ip = Ipv4::new("10.0.0.1/32").unwrap();
    for derived in [ip.network(), ip.broadcast(), ip.first(), ip.last()] {
        assert_eq!(derived.addr_string(), "10.0.0.1");
    }
    assert!(!ip.is_network());
    assert_eq!(ip.size(), 1u128);
}

#[test]
fn test_ipv6_compress_expand() {
    let original = "2001:0db8:0000:0000:0008:0800:200c:417a";
    let compressed = compress(original).unwrap();
    assert_eq!(compressed, "2001:db8::8:800:200c:417a");
    assert_eq!(expand(&compressed).unwrap(), original);
    assert_eq!(
        expand("2001:0DB8::8:800:200C:417A").unwrap(),
        original
    );
    assert_eq!(compress("0:0:0:0:0:0:0:0").unwrap(), "::");
}

#[test]
fn test_whole_ipv6_space() {
    let all = Ipv6::new("::/0").unwrap();
    assert_eq!(
        all.size().to_string(),
        "340282366920938463463374607431768211456"
    );
    assert_eq!(all.broadcast().compressed(), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
    assert!(all.next_network().is_err());
    assert_eq!(all.split(2).unwrap()[1].to_string(), "8000::/1");
}

#[test]
fn test_error_kinds() {
    assert!(matches!(
        Network::parse("10.0.0.256"),
        Err(CidrError::InvalidAddress(_))
    ));
    assert!(matches!(
        Network::parse("10.0.0.1/255.0.255.0"),
        Err(CidrError::InvalidNetmask(_))
    ));
    assert!(matches!(
        Network::parse("10.0.0.1/33"),
        Err(CidrError::OutOfRange(_))
    ));
    assert!(matches!(
        Network::parse("10.0.0.0/8")
            .unwrap()
            .includes(&Network::parse("::1").unwrap()),
        Err(CidrError::FamilyMismatch(_, _))
    ));
    assert!(matches!(
        Ipv4::new("10.0.0.1").unwrap().octet(4),
        Err(CidrError::IndexOutOfRange { index: 4, len: 4 })
    ));
    assert!(matches!(
        Network::parse("10.0.0.0/30").unwrap().split(5),
        Err(CidrError::OutOfRange(_))
    ));
}

#[test]
fn test_netmask_suffix() {
    let a = Network::parse("192.168.4.7/255.255.252.0").unwrap();
    let b = Network::parse("192.168.4.7/22").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.network().to_string(), "192.168.4.0/22");
}

#[test]
fn test_mapped_workflow() {
    let mapped = Ipv6Mapped::new("::ffff:192.168.1.10/120").unwrap();
    assert_eq!(mapped.ipv4().to_string(), "192.168.1.10/24");
    let net = Network::from(mapped);
    assert_eq!(net.family(), Family::V6);
    assert_eq!(net.classify(), AddressClass::Mapped);
    assert_eq!(net.network().to_string(), "::ffff:192.168.1.0/120");
    let halves = net.subnets(121).unwrap();
    assert_eq!(texts(&halves), ["::ffff:192.168.1.0/121", "::ffff:192.168.1.128/121"]);
}

#[test]
fn test_mixed_family_sorting() {
    let mut list = nets(&["2001:db8::/32", "10.0.0.0/8", "::1", "9.9.9.9"]);
    list.sort();
    assert_eq!(
        texts(&list),
        ["9.9.9.9/32", "10.0.0.0/8", "::1/128", "2001:db8::/32"]
    );
    assert!(list[0].compare(&list[3]).is_err());
}

#[test]
fn test_validation_probes() {
    assert!(valid("192.168.0.1/24"));
    assert!(!valid("fe80::1%eth0"));
    assert!(valid("::ffff:10.0.0.1"));
    assert!(!valid("1.2.3"));
    assert!(!valid("1:2:3:4:5:6:7:8:9"));
}

#[test]
fn test_cli_summarize_from_files() {
    let dir = std::env::temp_dir();
    let txt_path = dir.join(format!("cidr-algebra-{}.txt", std::process::id()));
    let json_path = dir.join(format!("cidr-algebra-{}.json", std::process::id()));

    let mut txt = std::fs::File::create(&txt_path).unwrap();
    writeln!(txt, "# two halves").unwrap();
    writeln!(txt, "10.0.0.0/25").unwrap();
    writeln!(txt, "10.0.0.128/25").unwrap();
    std::fs::write(&json_path, r#"["10.0.1.0/24"]"#).unwrap();

    let mut list = cidr_algebra::cli::read_input_file(txt_path.to_str().unwrap()).unwrap();
    list.extend(cidr_algebra::cli::read_input_file(json_path.to_str().unwrap()).unwrap());
    let summary = Network::summarize(&list).unwrap();
    assert_eq!(texts(&summary), ["10.0.0.0/23"]);

    let csv = output::render_networks(&summary, output::OutputFormat::Csv).unwrap();
    assert!(csv.contains("\"10.0.1.255\""));

    std::fs::remove_file(txt_path).ok();
    std::fs::remove_file(json_path).ok();
}
