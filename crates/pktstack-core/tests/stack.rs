use pktstack_core::{
    Buffer, CodecError, EthernetFrame, HwAddr, Layer, LayerKind, MacAddr, Packable, PacketType,
    Scope, SllPacket, Stack, VlanTag, decode, decode_from, encode,
};

const SLL_SIMPLE: [u8; 16] = [
    0x00, 0x04, 0x00, 0x01, 0x00, 0x06, 0x4c, 0x72, 0xb9, 0x54, 0xe5, 0x3d, 0x00, 0x00, 0x08, 0x00,
];

fn make_sll() -> SllPacket {
    SllPacket {
        packet_type: PacketType::Outgoing,
        addr_type: 1,
        addr: "4c:72:b9:54:e5:3d".parse().unwrap(),
        ether_type: 0x0800,
    }
}

#[test]
fn sll_capture_unpacks_and_packs_identically() {
    let mut buf = Buffer::from_slice(&SLL_SIMPLE);
    let mut packet = SllPacket::default();
    packet.unpack(&mut buf).unwrap();

    assert_eq!(packet.packet_type, PacketType::Outgoing);
    assert_eq!(packet.addr_type, 1);
    assert_eq!(packet.addr_len(), 6);
    assert_eq!(packet.addr.to_string(), "4c:72:b9:54:e5:3d");
    assert_eq!(packet.ether_type, 0x0800);

    let mut out = Buffer::new();
    packet.pack(&mut out).unwrap();
    assert_eq!(out.bytes(), SLL_SIMPLE.to_vec());
}

#[test]
fn round_trip_each_layer_kind() {
    let layers: Vec<Layer> = vec![
        make_sll().into(),
        SllPacket {
            packet_type: PacketType::Unknown(9),
            addr_type: 772,
            addr: HwAddr::default(),
            ether_type: 0,
        }
        .into(),
        EthernetFrame {
            dst: MacAddr::BROADCAST,
            src: MacAddr([0x02, 0, 0, 0, 0, 0x2a]),
            ether_type: 0x86dd,
        }
        .into(),
        VlanTag::new(7, true, 0x0fff, 0x0800).unwrap().into(),
    ];

    for layer in layers {
        let mut out = Buffer::new();
        layer.pack(&mut out).unwrap();
        let bytes = out.finish().unwrap();
        assert_eq!(bytes.len(), layer.wire_len());

        let mut decoded = layer.kind().empty();
        let mut buf = Buffer::from_slice(&bytes);
        decoded.unpack(&mut buf).unwrap();
        assert_eq!(decoded, layer);
        assert!(buf.remaining().is_empty());
    }
}

#[test]
fn linux_sll_capture_decodes_from_link_type() {
    let mut bytes = SLL_SIMPLE.to_vec();
    let ip = [0x45, 0x00, 0x00, 0x1c, 0x00, 0x00, 0x40, 0x00];
    bytes.extend_from_slice(&ip);

    let stack = decode_from(&bytes, Scope::LinkType, 113).unwrap();
    assert_eq!(stack.layers, vec![Layer::Sll(make_sll())]);
    assert_eq!(stack.payload, ip.to_vec());
    assert_eq!(encode(&stack).unwrap(), bytes);
}

#[test]
fn sll_over_vlan_over_bridged_ethernet() {
    let original = Stack {
        layers: vec![
            SllPacket {
                ether_type: 0x8100,
                ..make_sll()
            }
            .into(),
            VlanTag::new(3, false, 42, 0x6558).unwrap().into(),
            EthernetFrame {
                dst: MacAddr([0x01, 0x00, 0x5e, 0x00, 0x00, 0x01]),
                src: MacAddr([0x02, 0x42, 0xac, 0x11, 0x00, 0x02]),
                ether_type: 0x0806,
            }
            .into(),
        ],
        payload: vec![0x00, 0x01, 0x08, 0x00],
    };

    let bytes = encode(&original).unwrap();
    assert_eq!(bytes.len(), 16 + 4 + 14 + 4);
    let decoded = decode(&bytes, LayerKind::Sll).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn truncated_inner_layer_returns_partial_stack() {
    let mut bytes = SLL_SIMPLE.to_vec();
    bytes[14..16].copy_from_slice(&0x6558u16.to_be_bytes());
    bytes.extend_from_slice(&[0xff; 10]);

    let err = decode(&bytes, LayerKind::Sll).unwrap_err();
    assert!(matches!(
        err.error,
        CodecError::BufferUnderrun {
            needed: 6,
            remaining: 4
        }
    ));
    assert_eq!(err.stack.layers.len(), 1);
    assert_eq!(err.stack.payload, vec![0xff; 10]);

    let source = std::error::Error::source(&err).expect("source");
    assert!(source.to_string().contains("buffer underrun"));
}

#[test]
fn oversized_declared_address_length_fails_closed() {
    let mut bytes = SLL_SIMPLE.to_vec();
    bytes[4..6].copy_from_slice(&12u16.to_be_bytes());

    let err = decode(&bytes, LayerKind::Sll).unwrap_err();
    assert_eq!(
        err.error,
        CodecError::InvalidFieldValue {
            field: "addr_len",
            value: 12
        }
    );
    assert!(err.stack.layers.is_empty());
    assert_eq!(err.stack.payload, bytes);
}

#[test]
fn zero_padding_is_not_significant_on_decode() {
    let mut bytes = SLL_SIMPLE.to_vec();
    bytes[12] = 0xaa;
    bytes[13] = 0xbb;

    let stack = decode(&bytes, LayerKind::Sll).unwrap();
    let Layer::Sll(packet) = &stack.layers[0] else {
        panic!("expected sll layer");
    };
    assert_eq!(packet, &make_sll());
    // Non-zero padding is discarded, so re-encoding normalizes it.
    assert_eq!(encode(&stack).unwrap(), SLL_SIMPLE.to_vec());
}
