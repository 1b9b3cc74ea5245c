// In-memory stand-ins for the platform, shared by the core tests.

use super::message_port::MessagePort;
use crate::core::commands::{Command, CommandHandler, Invocation};
use crate::core::errors::Error;
use async_trait::async_trait;
use serenity::model::Permissions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BOT_ID: u64 = 999;

#[derive(Default)]
pub struct TestPort {
    replies: Mutex<Vec<String>>,
    sent: Mutex<Vec<String>>,
    typing: AtomicUsize,
    deleted: AtomicUsize,
    lookups: AtomicUsize,
    in_guild: bool,
    member: Permissions,
    channel: Permissions,
    bot: Permissions,
    fail_typing: bool,
}

impl TestPort {
    pub fn guild() -> Self {
        Self {
            in_guild: true,
            ..Self::default()
        }
    }

    pub fn direct() -> Self {
        Self::default()
    }

    pub fn with_member_permissions(mut self, permissions: Permissions) -> Self {
        self.member = permissions;
        self
    }

    pub fn with_channel_permissions(mut self, permissions: Permissions) -> Self {
        self.channel = permissions;
        self
    }

    pub fn with_bot_permissions(mut self, permissions: Permissions) -> Self {
        self.bot = permissions;
        self
    }

    pub fn failing_typing(mut self) -> Self {
        self.fail_typing = true;
        self
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn typing_count(&self) -> usize {
        self.typing.load(Ordering::SeqCst)
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.load(Ordering::SeqCst)
    }

    pub fn permission_lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn lookup(&self, permissions: Permissions) -> Option<Permissions> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.in_guild.then_some(permissions)
    }
}

#[async_trait]
impl MessagePort for TestPort {
    async fn reply(&self, content: &str) -> Result<(), Error> {
        self.replies.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn send(&self, content: &str) -> Result<(), Error> {
        self.sent.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn send_typing(&self) -> Result<(), Error> {
        if self.fail_typing {
            return Err("Missing Permissions".into());
        }
        self.typing.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_trigger(&self) -> Result<(), Error> {
        self.deleted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn member_permissions(&self) -> Result<Option<Permissions>, Error> {
        Ok(self.lookup(self.member))
    }

    async fn member_channel_permissions(&self) -> Result<Option<Permissions>, Error> {
        Ok(self.lookup(self.channel))
    }

    async fn bot_channel_permissions(&self) -> Result<Option<Permissions>, Error> {
        Ok(self.lookup(self.bot))
    }
}

pub struct Noop;

#[async_trait]
impl CommandHandler for Noop {
    async fn run(&self, _: &Invocation<'_>) -> Result<(), Error> {
        Ok(())
    }
}

pub fn noop_command(name: &str) -> Command {
    Command::new(name, Noop)
}

/// Records the arguments of every call.
#[derive(Clone, Default)]
pub struct CaptureHandler {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    commands: Arc<Mutex<Vec<String>>>,
}

impl CaptureHandler {
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the commands the handler ran as, after alias resolution.
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandHandler for CaptureHandler {
    async fn run(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        self.calls.lock().unwrap().push(invocation.args.clone());
        self.commands
            .lock()
            .unwrap()
            .push(invocation.command.name.clone());
        Ok(())
    }
}

pub struct FailingHandler;

#[async_trait]
impl CommandHandler for FailingHandler {
    async fn run(&self, _: &Invocation<'_>) -> Result<(), Error> {
        Err("handler exploded".into())
    }
}
