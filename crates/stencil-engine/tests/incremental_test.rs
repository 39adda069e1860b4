//! Incremental recomputation: reuse on unchanged inputs, scoped recompute on
//! edits, and join completeness when either side of a relation changes.

use stencil_core::types::{DeclKind, QualifiedName};
use stencil_core::AttrValue;
use stencil_engine::driver::PipelineDriver;
use stencil_engine::provider::{
    AttributeUsage, CtorDecl, Declaration, InMemoryProvider, MemberDecl, ParamDecl,
};

// ---- Helpers ----

fn builder_class(name: &str, member: &str) -> Declaration {
    let mut decl = Declaration::new(QualifiedName::new("App", name), DeclKind::Class);
    decl.attributes.push(AttributeUsage::new("GenerateBuilder"));
    decl.members.push(MemberDecl::new(member, "string"));
    decl
}

fn marked_interface(name: &str) -> Declaration {
    let mut decl = Declaration::new(QualifiedName::new("App", name), DeclKind::Interface);
    decl.attributes
        .push(AttributeUsage::new("GenerateDecoratorFactory"));
    decl
}

fn decorator(name: &str, target: &str) -> Declaration {
    let mut decl = Declaration::new(QualifiedName::new("App", name), DeclKind::Class);
    decl.attributes.push(AttributeUsage::new("Decorator"));
    decl.implements.push(target.to_string());
    decl.constructors.push(CtorDecl::public(vec![
        ParamDecl::new("inner", target),
        ParamDecl::new("label", "string"),
    ]));
    decl
}

// ---- Incrementality ----

#[test]
fn editing_unrelated_declaration_reuses_everything_else() {
    let user = builder_class("User", "Email");
    let order = builder_class("Order", "Total");
    let mut provider = InMemoryProvider::new(vec![user, order.clone()]);
    let mut driver = PipelineDriver::with_defaults();

    let first = driver.run(&provider).unwrap();
    let user_text_before = first
        .emissions
        .iter()
        .find(|e| e.hint_name == "UserBuilder")
        .unwrap()
        .text
        .clone();

    // Edit Order only.
    let mut edited = order;
    edited.members.push(MemberDecl::new("Currency", "string"));
    assert!(provider.replace(edited));

    let second = driver.run(&provider).unwrap();

    // User's resolution and emission were replayed from cache.
    assert_eq!(second.stats.resolutions_computed, 1);
    assert_eq!(second.stats.resolutions_reused, 1);
    assert_eq!(second.stats.emissions_computed, 1);
    assert_eq!(second.stats.emissions_reused, 1);

    // And its text is byte-identical.
    let user_text_after = &second
        .emissions
        .iter()
        .find(|e| e.hint_name == "UserBuilder")
        .unwrap()
        .text;
    assert_eq!(&user_text_before, user_text_after);

    // The edited root actually changed.
    let order_text = &second
        .emissions
        .iter()
        .find(|e| e.hint_name == "OrderBuilder")
        .unwrap()
        .text;
    assert!(order_text.contains("WithCurrency"));
}

#[test]
fn untouched_pass_reuses_the_join() {
    let provider = InMemoryProvider::new(vec![
        marked_interface("IRepository"),
        decorator("RetryDecorator", "IRepository"),
    ]);
    let mut driver = PipelineDriver::with_defaults();

    driver.run(&provider).unwrap();
    let warm = driver.run(&provider).unwrap();

    assert_eq!(warm.stats.joins_computed, 0);
    assert!(warm.stats.joins_reused > 0);
}

// ---- Join completeness ----

#[test]
fn new_satellite_regenerates_anchor_without_reordering_blocks() {
    let mut provider = InMemoryProvider::new(vec![
        marked_interface("IRepository"),
        decorator("CachingDecorator", "IRepository"),
        decorator("RetryDecorator", "IRepository"),
    ]);
    let mut driver = PipelineDriver::with_defaults();

    let before = driver.run(&provider).unwrap();
    let factory_before = &before.emissions[0];
    let caching_at = factory_before.text.find("WithCachingDecorator").unwrap();
    let retry_at = factory_before.text.find("WithRetryDecorator").unwrap();
    assert!(caching_at < retry_at);

    // The anchor declaration is untouched, but a new decorator appears:
    // the factory must regenerate with exactly one new block.
    provider.push(decorator("LoggingDecorator", "IRepository"));
    let after = driver.run(&provider).unwrap();

    let factory_after = &after.emissions[0];
    assert_eq!(
        factory_after.text.matches("public static IRepository With").count(),
        3
    );
    // Previously rendered blocks keep their relative order.
    let caching_after = factory_after.text.find("WithCachingDecorator").unwrap();
    let retry_after = factory_after.text.find("WithRetryDecorator").unwrap();
    assert!(caching_after < retry_after);
    // Anchor's emission was recomputed, not replayed.
    assert_eq!(after.stats.emissions_reused, 0);
}

#[test]
fn removing_a_satellite_also_retriggers_the_join() {
    let logging = decorator("LoggingDecorator", "IRepository");
    let mut provider = InMemoryProvider::new(vec![
        marked_interface("IRepository"),
        decorator("RetryDecorator", "IRepository"),
        logging.clone(),
    ]);
    let mut driver = PipelineDriver::with_defaults();

    let before = driver.run(&provider).unwrap();
    assert!(before.emissions[0].text.contains("WithLoggingDecorator"));

    assert!(provider.remove(&logging.id));
    let after = driver.run(&provider).unwrap();

    assert!(!after.emissions[0].text.contains("WithLoggingDecorator"));
    assert!(after.emissions[0].text.contains("WithRetryDecorator"));
}

// ---- Decision key stability ----

#[test]
fn decision_keys_unmoved_by_unrelated_edits() {
    let user = builder_class("User", "Email");
    let mut provider = InMemoryProvider::new(vec![user, builder_class("Order", "Total")]);
    let mut driver = PipelineDriver::with_defaults();
    driver.run(&provider).unwrap();

    let user_id = QualifiedName::new("App", "User");
    let key_before = driver
        .cache()
        .resolution("builder", &user_id)
        .and_then(|r| r.meta.as_ref())
        .map(|m| m.decision_key)
        .unwrap();

    let mut edited = builder_class("Order", "Total");
    edited.members.push(MemberDecl::new("Currency", "string"));
    provider.replace(edited);
    driver.run(&provider).unwrap();

    let key_after = driver
        .cache()
        .resolution("builder", &user_id)
        .and_then(|r| r.meta.as_ref())
        .map(|m| m.decision_key)
        .unwrap();
    assert_eq!(key_before, key_after);
}
