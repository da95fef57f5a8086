use std::io::Write;

use clap::Args;
use foodwagon::validation::{LoginForm, SignUpForm};
use foodwagon_app::{
    context::AppContext,
    services::{AuthError, AuthService},
};

use super::line;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Email or 10 digit phone number
    #[arg(long)]
    identifier: String,

    /// Password
    #[arg(long, env = "FOODWAGON_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Full name
    #[arg(long)]
    name: String,

    /// Email or 10 digit phone number
    #[arg(long)]
    identifier: String,

    /// Password: 8+ characters with a letter and a digit
    #[arg(long)]
    password: String,

    /// Password again
    #[arg(long)]
    confirm_password: String,
}

fn describe(error: &AuthError) -> String {
    match error {
        AuthError::Validation(errors) => format!("{} {errors}", error.user_message()),
        AuthError::Api(_) | AuthError::Session(_) => error.user_message().to_string(),
    }
}

pub(crate) async fn login(
    args: LoginArgs,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    let form = LoginForm {
        identifier: args.identifier,
        password: args.password,
    };

    let user = ctx
        .auth
        .login(&mut ctx.storefront, &form)
        .await
        .map_err(|error| describe(&error))?;

    line(out, format_args!("signed in as {} ({})", user.name, user.id))
}

pub(crate) async fn register(
    args: RegisterArgs,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    let form = SignUpForm {
        name: args.name,
        identifier: args.identifier,
        password: args.password,
        confirm_password: args.confirm_password,
    };

    let user = ctx
        .auth
        .register(&mut ctx.storefront, &form)
        .await
        .map_err(|error| describe(&error))?;

    line(out, format_args!("signed in as {} ({})", user.name, user.id))
}

pub(crate) fn logout(ctx: &mut AppContext) -> Result<(), String> {
    if !ctx.storefront.session().is_authenticated() {
        return Ok(());
    }

    AuthService::logout(&mut ctx.storefront).map_err(|error| describe(&error))
}

pub(crate) fn whoami(ctx: &AppContext, out: &mut dyn Write) -> Result<(), String> {
    let session = ctx.storefront.session();

    match session.user().filter(|_| session.is_authenticated()) {
        Some(user) => {
            line(out, format_args!("{} <{}>", user.name, user.email))?;

            if let Some(phone) = &user.phone {
                line(out, format_args!("phone: {phone}"))?;
            }

            if user.is_partner() {
                line(out, "role: restaurant partner")?;
            }

            Ok(())
        }
        None => line(out, "not signed in"),
    }
}

#[cfg(test)]
mod tests {
    use foodwagon::{
        orders::UserId,
        session::{User, UserRole},
    };
    use foodwagon_app::api::{ApiError, AuthResponse, MockStorefrontApi};
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::cli::tests::{context, run};

    fn priya() -> User {
        User {
            id: UserId(11),
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            phone: None,
            role: Some(UserRole::Partner),
        }
    }

    #[tokio::test]
    async fn login_whoami_logout() -> TestResult {
        let mut api = MockStorefrontApi::new();
        api.expect_login()
            .once()
            .with(
                eq("priya@example.com".to_string()),
                eq("secret1".to_string()),
            )
            .return_once(|_, _| {
                Ok(AuthResponse {
                    token: "session_1".to_string(),
                    user: priya(),
                })
            });

        let mut ctx = context(api);

        let printed = run(
            &mut ctx,
            &["login", "--identifier", " priya@example.com ", "--password", "secret1"],
        )
        .await?;

        assert!(printed.contains("signed in as Priya (11)"));
        assert!(printed.contains("[success] Welcome back, Priya!"));

        let printed = run(&mut ctx, &["whoami"]).await?;

        assert!(printed.contains("Priya <priya@example.com>"));
        assert!(printed.contains("role: restaurant partner"));

        let printed = run(&mut ctx, &["logout"]).await?;

        assert!(printed.contains("[info] Logged out successfully. See you soon!"));
        assert_eq!(run(&mut ctx, &["whoami"]).await?, "not signed in\n");

        Ok(())
    }

    #[tokio::test]
    async fn invalid_login_never_calls_backend() {
        let mut api = MockStorefrontApi::new();
        api.expect_login().never();

        let mut ctx = context(api);

        let result = run(
            &mut ctx,
            &["login", "--identifier", "12345", "--password", "abc"],
        )
        .await;

        assert!(result.is_err());
        assert!(!ctx.storefront.session().is_authenticated());
    }

    #[tokio::test]
    async fn backend_message_is_reported() -> TestResult {
        let mut api = MockStorefrontApi::new();
        api.expect_register().once().return_once(|_, _, _| {
            Err(ApiError::UnexpectedResponse {
                status: 409,
                message: "User already exists".to_string(),
            })
        });

        let mut ctx = context(api);

        let result = run(
            &mut ctx,
            &[
                "register",
                "--name",
                "Priya",
                "--identifier",
                "9876543210",
                "--password",
                "masala123",
                "--confirm-password",
                "masala123",
            ],
        )
        .await;

        let error = result.err().ok_or("registration should fail")?;

        assert!(error.contains("User already exists"));
        assert!(!ctx.storefront.session().is_authenticated());

        Ok(())
    }

    #[tokio::test]
    async fn logout_when_signed_out_is_silent() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new());

        assert_eq!(run(&mut ctx, &["logout"]).await?, "");

        Ok(())
    }
}
