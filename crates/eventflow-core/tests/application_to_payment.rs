//! End-to-end domain lifecycle: an admin's event takes a vendor
//! application through approval, the approval spawns a payment snapshot,
//! and the payment completes exactly once.

use uuid::Uuid;

use eventflow_core::domain::{
    Application, ApplicationStatus, CurrencyOptionsInput, Event, EventDraft, EventPatch,
    PaymentStatus, PaymentStatusChange, ReviewDecision,
};

#[test]
fn application_to_payment_lifecycle() {
    let admin_id = Uuid::new_v4();
    let vendor_id = Uuid::new_v4();

    // Admin creates the event: fee 500, currencies "USD,EUR", default USD.
    let mut event = Event::create(
        admin_id,
        EventDraft {
            name: Some("Spring Food Festival 2026".into()),
            event_date: Some("2026-04-15T10:00:00".into()),
            vendor_fee: Some(500.0),
            currency_options: Some(CurrencyOptionsInput::Csv("USD,EUR".into())),
            default_currency: Some("USD".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(event.currency_options, "USD,EUR");

    // Vendor applies; the application starts pending.
    let application = Application::new(
        vendor_id,
        event.id,
        Some("Gourmet burgers and craft beverages".into()),
        Some("10x10 booth with electricity and water access".into()),
        None,
    )
    .unwrap();
    assert_eq!(application.status, ApplicationStatus::Pending);

    // Admin approves: the transition yields the approved application and
    // the payment snapshot together.
    let outcome = application
        .review(
            &event,
            ReviewDecision::Approved,
            admin_id,
            Some("Excellent vendor with great reviews".into()),
        )
        .unwrap();
    assert_eq!(outcome.application.status, ApplicationStatus::Approved);
    assert_eq!(outcome.application.reviewed_by, Some(admin_id));

    let mut payment = outcome.payment.expect("approval spawns a payment");
    assert_eq!(payment.amount, 500.0);
    assert_eq!(payment.currency, "USD");
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert!(payment.payment_date.is_none());

    // Raising the fee later must not touch the recorded amount.
    event
        .apply(EventPatch {
            vendor_fee: Some(750.0),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(payment.amount, 500.0);

    // Completion stamps the payment date once.
    payment.apply_status_change(PaymentStatusChange {
        status: PaymentStatus::Completed,
        payment_method: Some(Some("credit_card".into())),
        transaction_id: Some(Some("TXN001234567".into())),
        ..Default::default()
    });
    let completed_at = payment.payment_date.expect("set on completion");

    // A second completed update leaves the original date alone.
    payment.apply_status_change(PaymentStatusChange {
        status: PaymentStatus::Completed,
        ..Default::default()
    });
    assert_eq!(payment.payment_date, Some(completed_at));
}
