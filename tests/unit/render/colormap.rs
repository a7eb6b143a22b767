use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for cm in Colormap::ALL {
        assert_eq!(cm.name().parse::<Colormap>().unwrap(), cm);
    }
    assert_eq!("  Viridis ".parse::<Colormap>().unwrap(), Colormap::Viridis);
    assert_eq!("grey".parse::<Colormap>().unwrap(), Colormap::Gray);
}

#[test]
fn unknown_name_is_invalid_input() {
    let err = "rainbow-unicorn".parse::<Colormap>().unwrap_err();
    assert!(matches!(err, HeatError::InvalidInput(ref m) if m.contains("jet")));
}

#[test]
fn jet_runs_from_dark_blue_to_dark_red() {
    assert_eq!(Colormap::Jet.sample(0.0), [0, 0, 128]);
    assert_eq!(Colormap::Jet.sample(1.0), [128, 0, 0]);
    let mid = Colormap::Jet.sample(0.5);
    assert!(mid[1] == 255, "jet midpoint should be green-ish, got {mid:?}");
}

#[test]
fn stop_tables_hit_their_endpoints() {
    assert_eq!(Colormap::Viridis.sample(0.0), [0x44, 0x01, 0x54]);
    assert_eq!(Colormap::Viridis.sample(1.0), [0xfd, 0xe7, 0x25]);
    assert_eq!(Colormap::Magma.sample(0.0), [0, 0, 4]);
}

#[test]
fn samples_clamp_out_of_range_inputs() {
    assert_eq!(Colormap::Gray.sample(-3.0), [0, 0, 0]);
    assert_eq!(Colormap::Gray.sample(7.0), [255, 255, 255]);
    assert_eq!(Colormap::Gray.sample(f64::NAN), [0, 0, 0]);
}

#[test]
fn serde_uses_lowercase_names() {
    let cm: Colormap = serde_json::from_str("\"plasma\"").unwrap();
    assert_eq!(cm, Colormap::Plasma);
    assert_eq!(serde_json::to_string(&Colormap::Hot).unwrap(), "\"hot\"");
}
