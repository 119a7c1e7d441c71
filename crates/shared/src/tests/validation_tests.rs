use super::*;
use crate::domain::EmployeeId;

fn leanne() -> Employee {
    Employee {
        id: EmployeeId(1),
        name: "Leanne Graham".to_string(),
        phone: "1-770-736-8031 x56442".to_string(),
        email: "Sincere@april.biz".to_string(),
        address: Address {
            street: "Kulas Light".to_string(),
            suite: "Apt. 556".to_string(),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
        },
        profile_picture: Some("https://example.com/leanne.png".to_string()),
    }
}

fn filled_form() -> EmployeeForm {
    EmployeeForm {
        name: "Dana Scully".to_string(),
        phone: "555-0199".to_string(),
        email: "dana@fbi.gov".to_string(),
        street: "Hoover Building".to_string(),
    }
}

#[test]
fn accepts_a_complete_form() {
    let valid = filled_form().validate().expect("valid form");
    assert_eq!(valid.name, "Dana Scully");
    assert_eq!(valid.street, "Hoover Building");
}

#[test]
fn empty_form_reports_every_field_in_order() {
    let errors = EmployeeForm::default().validate().expect_err("empty form");
    assert_eq!(errors.len(), 4);
    let fields: Vec<FormField> = errors.iter().map(|err| err.field).collect();
    assert_eq!(fields, FormField::ALL.to_vec());
    assert_eq!(errors.message_for(FormField::Name), Some("Name is required"));
    assert_eq!(errors.message_for(FormField::Phone), Some("Phone is required"));
    assert_eq!(
        errors.message_for(FormField::Email),
        Some("Invalid email address")
    );
    assert_eq!(
        errors.message_for(FormField::Street),
        Some("Address is required")
    );
}

#[test]
fn rejects_malformed_email_only() {
    let mut form = filled_form();
    form.email = "not-an-email".to_string();
    let errors = form.validate().expect_err("bad email");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.message_for(FormField::Email),
        Some("Invalid email address")
    );
    assert!(errors.message_for(FormField::Name).is_none());
}

#[test]
fn whitespace_only_fields_count_as_empty() {
    let mut form = filled_form();
    form.name = "   ".to_string();
    form.street = "\t".to_string();
    let errors = form.validate().expect_err("blank fields");
    assert!(errors.message_for(FormField::Name).is_some());
    assert!(errors.message_for(FormField::Street).is_some());
}

#[test]
fn trims_values_before_forwarding() {
    let mut form = filled_form();
    form.name = "  Dana Scully ".to_string();
    form.email = " dana@fbi.gov ".to_string();
    let valid = form.validate().expect("valid after trim");
    assert_eq!(valid.name, "Dana Scully");
    assert_eq!(valid.email, "dana@fbi.gov");
}

#[test]
fn unchanged_edit_form_still_validates() {
    let employee = leanne();
    let form = EmployeeForm::from_employee(&employee);
    let valid = form.validate().expect("prefilled form is valid");
    assert_eq!(valid.apply_to(&employee), employee);
}

#[test]
fn email_shapes() {
    for ok in [
        "a@b.co",
        "Sincere@april.biz",
        "first.last+tag@sub.example.org",
        "o'brien@example.ie",
    ] {
        assert!(is_valid_email(ok), "{ok} should be accepted");
    }
    for bad in [
        "",
        "not-an-email",
        "@example.com",
        "user@",
        "user@localhost",
        "user@@example.com",
        "us er@example.com",
        ".user@example.com",
        "user.@example.com",
        "us..er@example.com",
        "user@-example.com",
        "user@example..com",
        "user@example.c",
        "user@example.123",
    ] {
        assert!(!is_valid_email(bad), "{bad} should be rejected");
    }
}

#[test]
fn create_payload_blanks_unedited_address_parts() {
    let payload = filled_form().validate().expect("valid").create_payload();
    assert_eq!(payload.address.street, "Hoover Building");
    assert!(payload.address.suite.is_empty());
    assert!(payload.address.city.is_empty());
    assert!(payload.address.zipcode.is_empty());
}

#[test]
fn update_keeps_non_editable_fields() {
    let employee = leanne();
    let mut form = EmployeeForm::from_employee(&employee);
    form.phone = "555-0000".to_string();
    form.street = "Victor Plains".to_string();
    let valid = form.validate().expect("valid");

    let updated = valid.apply_to(&employee);
    assert_eq!(updated.id, employee.id);
    assert_eq!(updated.phone, "555-0000");
    assert_eq!(updated.address.street, "Victor Plains");
    assert_eq!(updated.address.suite, "Apt. 556");
    assert_eq!(updated.address.city, "Gwenborough");
    assert_eq!(updated.profile_picture, employee.profile_picture);

    let payload = valid.update_payload(&employee);
    assert_eq!(payload.address.zipcode, "92998-3874");
    assert_eq!(payload.phone, "555-0000");
}
