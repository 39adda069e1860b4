//! End-to-end pipeline tests: the four concrete scenarios plus determinism,
//! isolation, and required-member enforcement.

use stencil_core::types::{DeclKind, QualifiedName, SourceRef};
use stencil_core::{codes, AttrValue, Severity};
use stencil_engine::driver::PipelineDriver;
use stencil_engine::provider::{
    AttributeUsage, CtorDecl, Declaration, InMemoryProvider, MemberDecl, MethodDecl, ParamDecl,
};

// ---- Helpers ----

fn class(name: &str) -> Declaration {
    let mut decl = Declaration::new(QualifiedName::new("App", name), DeclKind::Class);
    decl.location = SourceRef::new(format!("{name}.cs"));
    decl
}

fn interface(name: &str) -> Declaration {
    let mut decl = Declaration::new(QualifiedName::new("App", name), DeclKind::Interface);
    decl.location = SourceRef::new(format!("{name}.cs"));
    decl
}

fn user_with_builder() -> Declaration {
    let mut decl = class("User");
    decl.attributes.push(AttributeUsage::new("GenerateBuilder"));
    decl.members
        .push(MemberDecl::new("Email", "string").with_attribute(AttributeUsage::new("Required")));
    decl.members.push(
        MemberDecl::new("Age", "int").with_attribute(
            AttributeUsage::new("Validate").with_arg("Method", AttrValue::Str("ValidateAge".into())),
        ),
    );
    decl.methods.push(
        MethodDecl::new("ValidateAge")
            .statik()
            .with_param(ParamDecl::new("value", "int"))
            .returning("bool"),
    );
    decl
}

fn marked_repository() -> Declaration {
    let mut decl = interface("IRepository");
    decl.attributes
        .push(AttributeUsage::new("GenerateDecoratorFactory"));
    decl
}

fn retry_decorator() -> Declaration {
    let mut decl = class("RetryDecorator");
    decl.attributes.push(AttributeUsage::new("Decorator"));
    decl.implements.push("IRepository".to_string());
    decl.constructors.push(CtorDecl::public(vec![
        ParamDecl::new("inner", "IRepository"),
        ParamDecl::new("maxRetries", "int"),
        ParamDecl::new("policy", "string"),
    ]));
    decl
}

fn run(decls: Vec<Declaration>) -> stencil_engine::driver::PipelineOutput {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let provider = InMemoryProvider::new(decls);
    let mut driver = PipelineDriver::with_defaults();
    driver.run(&provider).unwrap()
}

// ---- Scenario 1: marked interface, no satellites ----

#[test]
fn empty_satellite_set_is_not_an_error() {
    let mut service = interface("IService");
    service
        .attributes
        .push(AttributeUsage::new("GenerateDecoratorFactory"));
    service.methods.push(MethodDecl::new("DoWork"));

    let output = run(vec![service]);
    assert!(output.diagnostics.iter().all(|d| !d.is_error()));
    assert!(output.emissions.is_empty());
}

// ---- Scenario 2: builder metadata and rendered guards ----

#[test]
fn builder_renders_setters_and_validator_guard() {
    let output = run(vec![user_with_builder()]);

    assert_eq!(output.emissions.len(), 1);
    let unit = &output.emissions[0];
    assert_eq!(unit.hint_name, "UserBuilder");
    assert!(unit.text.contains("namespace App"));
    assert!(unit.text.contains("WithEmail(string value)"));
    assert!(unit.text.contains("WithAge(int value)"));
    assert!(unit.text.contains("if (!_emailSet)"));
    assert!(unit.text.contains("User.ValidateAge(_age)"));
}

// ---- Scenario 3: decorator factory from ctor parameters ----

#[test]
fn decorator_factory_takes_non_interface_ctor_params_in_order() {
    let output = run(vec![marked_repository(), retry_decorator()]);

    assert_eq!(output.emissions.len(), 1);
    let unit = &output.emissions[0];
    assert_eq!(unit.hint_name, "RepositoryDecoratorFactory");
    assert!(unit
        .text
        .contains("WithRetryDecorator(this IRepository inner, int maxRetries, string policy)"));
    assert!(unit.text.contains("new RetryDecorator(inner, maxRetries, policy)"));
    assert!(output.diagnostics.iter().all(|d| !d.is_error()));
}

// ---- Scenario 4: name collision warns but does not rename ----

#[test]
fn name_collision_is_single_warning_and_emission_proceeds() {
    let mut foo = class("Foo");
    foo.attributes.push(AttributeUsage::new("GenerateBuilder"));
    foo.members.push(MemberDecl::new("Bar", "string"));
    let existing = class("FooBuilder");

    let output = run(vec![foo, existing]);

    let collisions: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|d| d.code == codes::BLD004)
        .collect();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].severity, Severity::Warning);
    assert!(collisions[0].message.contains("FooBuilder"));
    // Still emitted, under the colliding name.
    assert_eq!(output.emissions.len(), 1);
    assert_eq!(output.emissions[0].hint_name, "FooBuilder");
}

// ---- Determinism ----

#[test]
fn identical_input_identical_output_across_fresh_drivers() {
    let decls = vec![
        user_with_builder(),
        marked_repository(),
        retry_decorator(),
    ];
    let a = run(decls.clone());
    let b = run(decls);
    assert_eq!(a.emissions, b.emissions);
    assert_eq!(a.diagnostics, b.diagnostics);
}

#[test]
fn declaration_order_does_not_change_output() {
    let decls = vec![user_with_builder(), marked_repository(), retry_decorator()];
    let mut reversed = decls.clone();
    reversed.reverse();

    let forward = run(decls);
    let backward = run(reversed);
    assert_eq!(forward.emissions, backward.emissions);
    assert_eq!(forward.diagnostics, backward.diagnostics);
}

#[test]
fn second_pass_on_warm_cache_is_byte_identical() {
    let provider = InMemoryProvider::new(vec![user_with_builder(), marked_repository(), retry_decorator()]);
    let mut driver = PipelineDriver::with_defaults();

    let cold = driver.run(&provider).unwrap();
    let warm = driver.run(&provider).unwrap();

    assert_eq!(cold.emissions, warm.emissions);
    assert_eq!(cold.diagnostics, warm.diagnostics);
    // And the warm pass actually reused the work.
    assert_eq!(warm.stats.resolutions_computed, 0);
    assert!(warm.stats.resolutions_reused > 0);
    assert_eq!(warm.stats.emissions_computed, 0);
}

// ---- Isolation ----

#[test]
fn malformed_root_does_not_affect_other_roots() {
    // Non-partial singleton: fatal for that root only.
    let mut broken = class("BrokenService");
    broken.attributes.push(AttributeUsage::new("Singleton"));

    let output = run(vec![broken, user_with_builder(), marked_repository(), retry_decorator()]);

    // Well-formed roots all emitted.
    let names: Vec<&str> = output.emissions.iter().map(|e| e.hint_name.as_str()).collect();
    assert_eq!(names, vec!["RepositoryDecoratorFactory", "UserBuilder"]);

    // Every Error mentions only the broken root.
    let errors: Vec<_> = output.diagnostics.iter().filter(|d| d.is_error()).collect();
    assert!(!errors.is_empty());
    for error in errors {
        assert_eq!(error.root.name, "BrokenService");
        assert!(error.message.contains("BrokenService"));
    }
}

#[test]
fn member_scoped_error_skips_member_but_emits_root() {
    let mut decl = class("Order");
    decl.attributes.push(AttributeUsage::new("GenerateBuilder"));
    decl.members.push(MemberDecl::new("Total", "decimal"));
    // Validator that does not exist: Error scoped to the member.
    decl.members.push(
        MemberDecl::new("Discount", "int").with_attribute(
            AttributeUsage::new("Validate").with_arg("Method", AttrValue::Str("Missing".into())),
        ),
    );

    let output = run(vec![decl]);

    assert_eq!(output.emissions.len(), 1);
    let text = &output.emissions[0].text;
    assert!(text.contains("WithTotal"));
    assert!(!text.contains("WithDiscount"));

    let errors: Vec<_> = output.diagnostics.iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::BLD002);
    assert_eq!(errors[0].member.as_deref(), Some("Discount"));
}

// ---- Required-member enforcement ----

#[test]
fn required_member_renders_runtime_guard() {
    let output = run(vec![user_with_builder()]);
    let text = &output.emissions[0].text;
    assert!(text.contains("Required member 'Email' was not set."));
}

#[test]
fn ignored_wins_over_required_with_warning() {
    let mut decl = class("Report");
    decl.attributes.push(AttributeUsage::new("GenerateBuilder"));
    decl.members.push(MemberDecl::new("Title", "string"));
    decl.members.push(
        MemberDecl::new("Stamp", "string")
            .with_attribute(AttributeUsage::new("Required"))
            .with_attribute(AttributeUsage::new("Ignore")),
    );

    let output = run(vec![decl]);

    let conflict: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|d| d.code == codes::BLD003)
        .collect();
    assert_eq!(conflict.len(), 1);
    assert_eq!(conflict[0].severity, Severity::Warning);

    // Ignored wins: no setter, no guard for the conflicted member.
    let text = &output.emissions[0].text;
    assert!(!text.contains("WithStamp"));
    assert!(!text.contains("'Stamp' was not set"));
}

// ---- Empty roots ----

#[test]
fn builder_with_no_usable_members_warns_and_skips_output() {
    let mut decl = class("Hollow");
    decl.attributes.push(AttributeUsage::new("GenerateBuilder"));
    decl.members.push(MemberDecl::new("Sealed", "string").without_setter());

    let output = run(vec![decl]);

    assert!(output.emissions.is_empty());
    let warnings: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|d| d.code == codes::BLD005)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Warning);
}

// ---- Mediator wiring ----

#[test]
fn mediator_dispatcher_wires_request_to_handler() {
    let mut request = Declaration::new(QualifiedName::new("App", "GetUser"), DeclKind::Record);
    request.attributes.push(
        AttributeUsage::new("Request").with_arg("Response", AttrValue::TypeRef("UserDto".into())),
    );
    let mut handler = class("GetUserHandler");
    handler.attributes.push(
        AttributeUsage::new("RequestHandler")
            .with_arg("RequestType", AttrValue::TypeRef("GetUser".into())),
    );

    let output = run(vec![request, handler]);

    assert_eq!(output.emissions.len(), 1);
    let unit = &output.emissions[0];
    assert_eq!(unit.hint_name, "GetUserDispatcher");
    assert!(unit
        .text
        .contains("public static UserDto Dispatch(GetUser request, GetUserHandler handler)"));
}

#[test]
fn orphan_handler_is_an_error_not_silently_dropped() {
    let mut handler = class("GhostHandler");
    handler.attributes.push(
        AttributeUsage::new("RequestHandler")
            .with_arg("RequestType", AttrValue::TypeRef("Ghost".into())),
    );

    let output = run(vec![handler]);

    assert!(output.emissions.is_empty());
    let errors: Vec<_> = output.diagnostics.iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::MED002);
    assert!(errors[0].message.contains("GhostHandler"));
    assert!(errors[0].message.contains("Ghost"));
}

// ---- Cross-reference tie-breaks ----

#[test]
fn ambiguous_decorator_target_resolved_lexicographically_with_info() {
    let mut cache_marker = interface("ICache");
    cache_marker
        .attributes
        .push(AttributeUsage::new("GenerateDecoratorFactory"));

    let mut both = retry_decorator();
    both.implements.push("ICache".to_string());

    let output = run(vec![marked_repository(), cache_marker, both]);

    // App.ICache < App.IRepository: the decorator lands on ICache.
    assert_eq!(output.emissions.len(), 1);
    assert_eq!(output.emissions[0].hint_name, "CacheDecoratorFactory");

    let infos: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|d| d.code == codes::DEC003)
        .collect();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].severity, Severity::Info);
    assert!(infos[0].message.contains("ICache"));
}

#[test]
fn duplicate_handlers_warn_and_dispatch_to_lexicographic_least() {
    let mut request = Declaration::new(QualifiedName::new("App", "Ping"), DeclKind::Record);
    request.attributes.push(AttributeUsage::new("Request"));
    let mut first = class("AlphaHandler");
    first.attributes.push(
        AttributeUsage::new("RequestHandler")
            .with_arg("RequestType", AttrValue::TypeRef("Ping".into())),
    );
    let mut second = class("BetaHandler");
    second.attributes.push(
        AttributeUsage::new("RequestHandler")
            .with_arg("RequestType", AttrValue::TypeRef("Ping".into())),
    );

    let output = run(vec![request, first, second]);

    let warnings: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|d| d.code == codes::MED004)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("AlphaHandler"));

    assert_eq!(output.emissions.len(), 1);
    assert!(output.emissions[0].text.contains("AlphaHandler handler"));
    assert!(!output.emissions[0].text.contains("BetaHandler"));
}

// ---- Singleton strategies ----

#[test]
fn singleton_emits_strategy_block_into_partial_class() {
    let mut service = class("ConfigurationService");
    service.is_partial = true;
    service.constructors.push(CtorDecl::private(Vec::new()));
    service.attributes.push(
        AttributeUsage::new("Singleton").with_arg("Strategy", AttrValue::Str("Eager".into())),
    );

    let output = run(vec![service]);

    assert_eq!(output.emissions.len(), 1);
    let unit = &output.emissions[0];
    assert_eq!(unit.hint_name, "ConfigurationServiceSingleton");
    assert!(unit.text.contains("partial class ConfigurationService"));
    assert!(unit.text.contains("public static ConfigurationService Instance => _instance;"));
}
