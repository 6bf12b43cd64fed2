use ifs_form::map_link::UNKNOWN_PORTAL;
use ifs_form::parse_map_link;
use ifs_form::FieldStore;
use ifs_form::MapLinkError;
use ifs_form::PortalParser;
use ifs_form::PortalSlot;
use pretty_assertions::assert_eq;

/// Test the common Google Maps share link shape.
#[test]
fn coordinates_and_name() {
    let location = parse_map_link(
        "https://maps.google.com/maps?ll=47.491558,19.069074&q=47.491558,19.069074%20(Test%20Portal)&z=17",
    )
    .unwrap();
    assert_eq!(location.latitude, "47.491558");
    assert_eq!(location.longitude, "19.069074");
    assert_eq!(location.name, "Test Portal");
    assert_eq!(
        location.intel_url(),
        "https://intel.ingress.com/intel?pll=47.491558,19.069074"
    );
}

/// Test that a label without a parenthesized name falls back to the placeholder.
#[test]
fn unknown_portal() {
    let location =
        parse_map_link("https://maps.google.com/?ll=47.491558,19.069074&q=47.491558,19.069074")
            .unwrap();
    assert_eq!(location.name, UNKNOWN_PORTAL);
}

/// Test that both kinds of failure are reported distinctly and leave everything alone.
#[test]
fn failures_leave_input_and_fields_unchanged() {
    let mut store = FieldStore::ingress_defaults();
    let mut parser = PortalParser::new(PortalSlot::Base);

    parser.set_input("maps.google.com ll=1,2");
    let err = parser.parse(&mut store).unwrap_err();
    assert!(matches!(err, MapLinkError::InvalidUrl { .. }), "{err:?}");
    assert_eq!(parser.input(), "maps.google.com ll=1,2");

    parser.set_input("https://maps.google.com/?z=17");
    assert_eq!(parser.parse(&mut store), Err(MapLinkError::MissingParams));
    assert_eq!(parser.input(), "https://maps.google.com/?z=17");

    assert_eq!(store, FieldStore::ingress_defaults());
}

/// Test that the two slots write to their own fields.
#[test]
fn slots_write_their_own_fields() {
    let mut store = FieldStore::ingress_defaults();

    let mut base = PortalParser::new(PortalSlot::Base);
    base.set_input("https://maps.google.com/?ll=1.5,2.5&q=1.5,2.5%20(Lions)");
    base.parse(&mut store).unwrap();

    let mut restock = PortalParser::new(PortalSlot::Restock);
    restock.set_input("https://maps.google.com/?ll=3.5,4.5&q=3.5,4.5%20(Blue%20House)");
    restock.parse(&mut store).unwrap();

    assert_eq!(store.value_of("Base Portal Name"), "Lions");
    assert_eq!(
        store.value_of("Base Portal URL"),
        "https://intel.ingress.com/intel?pll=1.5,2.5"
    );
    assert_eq!(store.value_of("Restocking Portal Name"), "Blue House");
    assert_eq!(
        store.value_of("Restocking Portal Intel URL"),
        "https://intel.ingress.com/intel?pll=3.5,4.5"
    );
    assert_eq!(base.input(), "");
    assert_eq!(restock.input(), "");
}
