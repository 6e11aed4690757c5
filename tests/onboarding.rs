mod common;

use common::{auth_ok, client_for, failure};
use employme::{
    guard::paths, FlowError, LoginFlow, LoginStep, RegistrationForm, Role, SignupFlow,
    SignupStep, Transition,
};
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

fn filled_form(email: &str) -> RegistrationForm {
    RegistrationForm {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: email.to_string(),
        password: "cobol-forever".to_string(),
        confirm_password: "cobol-forever".to_string(),
    }
}

fn flow_at_register(role: Role, email: &str) -> SignupFlow {
    let mut flow = SignupFlow::new();
    flow.select_role(role).unwrap();
    *flow.form_mut() = filled_form(email);
    flow
}

#[tokio::test]
async fn employer_signup_moves_to_verification_with_submitted_email() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);

    let register = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/register").json_body(json!({
                "email": "a@b.com",
                "password": "cobol-forever",
                "firstName": "Grace",
                "lastName": "Hopper",
                "role": "EMPLOYER"
            }));
            then.status(201).json_body(json!({ "success": true }));
        })
        .await;

    let mut flow = flow_at_register(Role::Employer, "a@b.com");
    let transition = flow.submit_registration(&mut client).await.unwrap();
    register.assert_async().await;

    assert_eq!(transition, Transition::Advanced);
    assert_eq!(
        flow.step(),
        &SignupStep::VerifyEmail {
            role: Role::Employer,
            email: "a@b.com".to_string()
        }
    );
    assert_eq!(flow.pending_email(), Some("a@b.com"));
    assert_eq!(flow.error(), None);
    assert!(!client.session().snapshot().is_authenticated());
}

#[tokio::test]
async fn failed_registration_stays_on_form_with_inline_error() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/register");
            then.status(409).json_body(failure("Email already registered"));
        })
        .await;

    let mut flow = flow_at_register(Role::JobSeeker, "a@b.com");

    for _ in 0..2 {
        let transition = flow.submit_registration(&mut client).await.unwrap();
        assert_eq!(transition, Transition::Stayed);
        assert_eq!(flow.error(), Some("Email already registered"));
        assert_eq!(flow.step(), &SignupStep::Register { role: Role::JobSeeker });
    }
}

#[tokio::test]
async fn invalid_form_is_not_submitted() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);

    let register = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/register");
            then.status(201).json_body(json!({ "success": true }));
        })
        .await;

    let mut flow = flow_at_register(Role::Employer, "a@b.com");
    flow.form_mut().confirm_password = "something else".to_string();

    let transition = flow.submit_registration(&mut client).await.unwrap();

    assert_eq!(transition, Transition::Stayed);
    assert_eq!(flow.error(), Some("Passwords do not match."));
    assert_eq!(register.hits_async().await, 0);
}

async fn signed_up(server: &MockServer, client: &mut employme::EmployMe) -> SignupFlow {
    let register = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/register");
            then.status(201).json_body(json!({ "success": true }));
        })
        .await;

    let mut flow = flow_at_register(Role::JobSeeker, "a@b.com");
    flow.submit_registration(client).await.unwrap();
    register.delete_async().await;
    flow
}

#[tokio::test]
async fn resending_a_code_never_changes_the_step() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);
    let mut flow = signed_up(&server, &mut client).await;
    let step = flow.step().clone();

    let resend_ok = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/resend-verification")
                .json_body(json!({ "email": "a@b.com" }));
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;

    assert_eq!(flow.resend_code(&mut client).await.unwrap(), Transition::Stayed);
    assert_eq!(flow.step(), &step);
    assert_eq!(flow.notice(), Some("A new code has been sent to a@b.com."));
    resend_ok.assert_async().await;
    resend_ok.delete_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/resend-verification");
            then.status(429).json_body(failure("Too many requests, slow down"));
        })
        .await;

    assert_eq!(flow.resend_code(&mut client).await.unwrap(), Transition::Stayed);
    assert_eq!(flow.step(), &step);
    assert_eq!(flow.error(), Some("Too many requests, slow down"));
}

#[tokio::test]
async fn verified_signup_redirects_to_login() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);
    let mut flow = signed_up(&server, &mut client).await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/verify-email")
                .json_body(json!({ "code": "123456" }));
            then.status(200).json_body(auth_ok("JOB_SEEKER", false));
        })
        .await;

    let transition = flow.submit_code(&mut client, "123456").await.unwrap();

    assert_eq!(transition, Transition::Redirect(paths::LOGIN));
    assert!(client.session().snapshot().is_authenticated());
    assert_eq!(flow.step(), &SignupStep::RoleSelection);
    assert_eq!(flow.pending_email(), None);
    assert_eq!(flow.form(), &RegistrationForm::default());
}

#[tokio::test]
async fn wrong_or_malformed_code_stays_on_verification() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);
    let mut flow = signed_up(&server, &mut client).await;

    let verify = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/verify-email");
            then.status(400).json_body(failure("Invalid or expired verification code"));
        })
        .await;

    let transition = flow.submit_code(&mut client, "12ab").await.unwrap();
    assert_eq!(transition, Transition::Stayed);
    assert_eq!(
        flow.error(),
        Some("Verification code must be exactly 6 digits.")
    );
    assert_eq!(verify.hits_async().await, 0);

    let transition = flow.submit_code(&mut client, "000000").await.unwrap();
    assert_eq!(transition, Transition::Stayed);
    assert_eq!(flow.error(), Some("Invalid or expired verification code"));
    assert_eq!(flow.pending_email(), Some("a@b.com"));
    assert!(!client.session().snapshot().is_authenticated());
}

#[tokio::test]
async fn start_over_discards_pending_email() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);
    let mut flow = signed_up(&server, &mut client).await;

    flow.start_over();

    assert_eq!(flow.step(), &SignupStep::RoleSelection);
    assert_eq!(flow.pending_email(), None);
    assert!(matches!(
        flow.resend_code(&mut client).await,
        Err(FlowError::InvalidStep { .. })
    ));
}

#[tokio::test]
async fn cancelled_flow_sends_nothing_and_keeps_state() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);

    let register = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/register");
            then.status(201).json_body(json!({ "success": true }));
        })
        .await;

    let mut flow = flow_at_register(Role::Employer, "a@b.com");
    flow.scope().cancel();

    let transition = flow.submit_registration(&mut client).await.unwrap();

    assert_eq!(transition, Transition::Cancelled);
    assert_eq!(flow.step(), &SignupStep::Register { role: Role::Employer });
    assert_eq!(flow.error(), None);
    assert_eq!(register.hits_async().await, 0);
}

#[tokio::test]
async fn cancelling_during_verification_leaves_session_untouched() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);
    let mut flow = signed_up(&server, &mut client).await;
    let step = flow.step().clone();

    let verify = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/verify-email");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(auth_ok("JOB_SEEKER", false));
        })
        .await;

    let token = flow.scope().cancellation_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let transition = flow.submit_code(&mut client, "123456").await.unwrap();

    assert_eq!(transition, Transition::Cancelled);
    assert_eq!(flow.step(), &step);
    assert_eq!(flow.error(), None);
    assert_eq!(verify.hits_async().await, 1);

    // Give the delayed response time to arrive; nobody is listening any more.
    tokio::time::sleep(Duration::from_millis(600)).await;

    let session = client.session().snapshot();
    assert!(!session.is_authenticated());
    assert!(!session.is_loading);
    assert_eq!(client.token(), None);
}

#[tokio::test]
async fn unverified_login_switches_to_verification() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(403).json_body(failure("Please verify your email"));
        })
        .await;
    let verify = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/verify-email")
                .json_body(json!({ "code": "654321" }));
            then.status(200).json_body(auth_ok("EMPLOYER", false));
        })
        .await;

    let mut flow = LoginFlow::new();
    let transition = flow
        .submit_credentials(&mut client, " new@acme.io ", "correct horse")
        .await
        .unwrap();

    assert_eq!(transition, Transition::Advanced);
    assert_eq!(
        flow.step(),
        &LoginStep::VerifyEmail {
            email: "new@acme.io".to_string()
        }
    );
    assert_eq!(flow.error(), None);

    let transition = flow.submit_code(&mut client, "654321").await.unwrap();
    verify.assert_async().await;

    assert_eq!(transition, Transition::Advanced);
    assert_eq!(flow.step(), &LoginStep::Credentials);
    assert_eq!(flow.notice(), Some("Email verified. You can now log in."));
}

#[tokio::test]
async fn successful_login_redirects_to_role_dashboard() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(auth_ok("EMPLOYER", true));
        })
        .await;

    let mut flow = LoginFlow::new();
    let transition = flow
        .submit_credentials(&mut client, "a@b.com", "correct horse")
        .await
        .unwrap();

    assert_eq!(transition, Transition::Redirect(paths::EMPLOYER_DASHBOARD));
    assert!(client.session().snapshot().is_authenticated());
}

#[tokio::test]
async fn failed_login_shows_server_message() {
    let server = MockServer::start_async().await;
    let mut client = client_for(&server);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(401).json_body(failure("Invalid email or password"));
        })
        .await;

    let mut flow = LoginFlow::new();
    let transition = flow
        .submit_credentials(&mut client, "a@b.com", "nope")
        .await
        .unwrap();

    assert_eq!(transition, Transition::Stayed);
    assert_eq!(flow.step(), &LoginStep::Credentials);
    assert_eq!(flow.error(), Some("Invalid email or password"));
}
