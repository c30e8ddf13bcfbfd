use std::sync::Arc;

use cmship_core::{AddressComponents, Coordinates, GeocodeResult};
use cmship_estimator::{EstimateError, RateBasis, ShippingEstimator, Suggestions};

use super::*;

fn flow() -> CheckoutFlow {
    CheckoutFlow::new(Arc::new(ShippingEstimator::default()))
}

fn candidate(city: &str, coords: Option<Coordinates>) -> GeocodeResult {
    GeocodeResult {
        formatted: format!("{city}, Cameroon"),
        coordinates: coords,
        components: AddressComponents {
            city: Some(city.to_string()),
            ..AddressComponents::default()
        },
    }
}

fn douala() -> GeocodeResult {
    candidate("Douala", Some(Coordinates::new(4.0511, 9.7679)))
}

#[test]
fn starts_idle_with_no_fee() {
    let f = flow();
    assert_eq!(f.stage(), &CheckoutStage::Idle);
    assert_eq!(f.shipping_fee(), None);
    assert_eq!(f.summary(10_000), OrderSummary::new(10_000, 0));
}

#[test]
fn happy_path_reaches_confirmed() {
    let mut f = flow();
    f.edit_location(" Douala ");
    assert_eq!(
        f.stage(),
        &CheckoutStage::Searching {
            query: "Douala".to_string()
        }
    );

    assert!(f.suggestions_arrived("Douala", vec![douala()]));
    assert_eq!(f.stage().kind(), StageKind::SuggestionsShown);

    let quote = f.select(0).unwrap();
    assert_eq!(quote.fee, 2500);
    assert_eq!(quote.basis, RateBasis::FixedRate);
    assert_eq!(f.stage().kind(), StageKind::Quoted);
    assert_eq!(f.shipping_fee(), None, "quoted is not yet confirmed");

    f.confirm().unwrap();
    assert_eq!(f.shipping_fee(), Some(2500));
    assert_eq!(f.summary(20_000).total, 22_500);
}

#[test]
fn stale_suggestions_are_ignored() {
    let mut f = flow();
    f.edit_location("Douala");
    f.edit_location("Yaoundé");
    assert!(!f.suggestions_arrived("Douala", vec![douala()]));
    assert_eq!(f.stage().kind(), StageKind::Searching);
}

#[test]
fn suggestions_outside_searching_are_ignored() {
    let mut f = flow();
    assert!(!f.suggestions_arrived("Douala", vec![douala()]));
    assert_eq!(f.stage(), &CheckoutStage::Idle);
}

#[test]
fn published_suggestions_can_be_applied() {
    let mut f = flow();
    f.edit_location("Douala");
    let published = Suggestions {
        generation: 3,
        query: "Douala".to_string(),
        results: vec![douala()],
        notice: None,
    };
    assert!(f.apply_suggestions(&published));
    assert_eq!(f.select(0).unwrap().city, "Douala");
}

#[test]
fn editing_drops_confirmed_quote() {
    let mut f = flow();
    f.edit_location("Douala");
    f.suggestions_arrived("Douala", vec![douala()]);
    f.select(0).unwrap();
    f.confirm().unwrap();

    f.edit_location("Limbe");
    assert_eq!(f.shipping_fee(), None);
    f.edit_location("   ");
    assert_eq!(f.stage(), &CheckoutStage::Idle);
}

#[test]
fn select_out_of_range_keeps_stage() {
    let mut f = flow();
    f.edit_location("Douala");
    f.suggestions_arrived("Douala", vec![douala()]);
    let err = f.select(3).unwrap_err();
    assert!(matches!(
        err,
        FlowError::NoSuchSuggestion {
            index: 3,
            available: 1
        }
    ));
    assert_eq!(f.stage().kind(), StageKind::SuggestionsShown);
}

#[test]
fn select_candidate_without_coordinates_fails() {
    let mut f = flow();
    f.edit_location("Littoral");
    f.suggestions_arrived("Littoral", vec![candidate("Littoral", None)]);
    let err = f.select(0).unwrap_err();
    assert!(matches!(
        err,
        FlowError::Estimate(EstimateError::MissingCoordinates { .. })
    ));
    assert_eq!(f.stage().kind(), StageKind::SuggestionsShown);
}

#[test]
fn invalid_transitions_are_reported() {
    let mut f = flow();
    let err = f.select(0).unwrap_err();
    assert!(matches!(
        err,
        FlowError::InvalidTransition {
            stage: StageKind::Idle,
            ..
        }
    ));
    assert_eq!(err.to_string(), "cannot select a suggestion while idle");

    f.edit_location("Buea");
    let err = f.confirm().unwrap_err();
    assert!(matches!(
        err,
        FlowError::InvalidTransition {
            stage: StageKind::Searching,
            ..
        }
    ));
    assert_eq!(f.stage().kind(), StageKind::Searching);
}

#[test]
fn manual_address_confirms_default_fee() {
    let mut f = flow();
    f.edit_location("somewhere");
    let quote = f.enter_manual_address("  Quartier Bastos, Yaoundé ").unwrap();
    assert_eq!(quote.basis, RateBasis::Default);
    assert_eq!(quote.address, "Quartier Bastos, Yaoundé");
    assert_eq!(f.shipping_fee(), Some(5000));
}

#[test]
fn blank_manual_address_is_rejected() {
    let mut f = flow();
    assert!(matches!(
        f.enter_manual_address("  "),
        Err(FlowError::EmptyAddress)
    ));
    assert_eq!(f.stage(), &CheckoutStage::Idle);
}
