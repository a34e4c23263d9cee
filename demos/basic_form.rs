use std::sync::Arc;

use form_validator::{
    DataRecord, Engine, FormValidator, MessageOverride, MessageOverrides, RuleExpressions,
};

fn main() {
    println!("=== Basic Form Demo ===");

    let rules: RuleExpressions = [
        ("name", "required|max:255"),
        ("email", "required|max:255|email"),
        ("age", "required|between:18,30"),
        ("uuid", "required|uuid"),
        ("aboutYou", "required_if:name,John,email,email@john.com"),
        ("surename", "required_with:name,age"),
    ]
    .into_iter()
    .map(|(field, rule)| (field.to_string(), rule.to_string()))
    .collect();

    let mut messages = MessageOverrides::new();
    messages.insert("required".to_string(), MessageOverride::text("This field is required"));
    messages.insert(
        "name".to_string(),
        MessageOverride::field([("required", "Please enter your name")]),
    );
    messages.insert(
        "aboutYou".to_string(),
        MessageOverride::field([("required_if", "Tell more about you.")]),
    );

    let mut form = match FormValidator::new(
        Engine::default(),
        Arc::new(rules),
        DataRecord::new(),
        messages,
    ) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("Invalid rules: {}", e);
            return;
        }
    };

    let edits = [
        ("name", "John"),
        ("email", "email@john"),
        ("email", "email@john.com"),
        ("age", "17"),
        ("age", "25"),
        ("uuid", "123e4567-e89b-12d3-a456-426614174000"),
        ("aboutYou", "Likes tidy forms"),
        ("surename", "Smith"),
    ];

    print_state(&form);
    for (field, value) in edits {
        println!("\n> {} = {:?}", field, value);
        if let Err(e) = form.set_value(field, value) {
            eprintln!("Invalid rules: {}", e);
            return;
        }
        print_state(&form);
    }
}

fn print_state(form: &FormValidator) {
    println!("valid: {}", form.valid());
    for field in form.rules().keys() {
        if let Some(message) = form.errors().first(field) {
            println!("  {}: {}", field, message);
        }
    }
}
