use std::{
    collections::VecDeque,
    io,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use crate::{
    generation::{GenerationError, TextGenerator},
    infra::{
        account_store::AccountStore, config::AppConfig, storage_layout::StorageLayout,
        stubs::MemoryKeyValueStorage,
    },
    ui::terminal::ChatTerminal,
    usecases::context::AppContext,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().expect("env lock should not be poisoned")
}

/// Ready, memory-backed context plus a handle on its storage.
pub fn memory_context(generator: StubGenerator) -> (AppContext, MemoryKeyValueStorage) {
    let storage = MemoryKeyValueStorage::default();
    let layout = StorageLayout::resolve(Some(Path::new("/tmp/chatinside-test")))
        .expect("explicit data dir should resolve");
    let mut context = AppContext::new(
        AppConfig::default(),
        layout,
        AccountStore::new(Box::new(storage.clone())),
        Box::new(generator),
        true,
    );
    context.store.load();
    context.session.mark_ready();
    (context, storage)
}

/// Generator with a canned outcome that records every prompt it receives.
pub struct StubGenerator {
    result: Result<String, GenerationError>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            result: Ok(text.to_owned()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            result: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_owned());
        self.result.clone()
    }
}

/// Terminal fed from scripted lines and secrets; everything printed is kept.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    lines: VecDeque<String>,
    secrets: VecDeque<String>,
    pub output: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new(lines: &[&str], secrets: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| (*line).to_owned()).collect(),
            secrets: secrets.iter().map(|secret| (*secret).to_owned()).collect(),
            output: Vec::new(),
        }
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

impl ChatTerminal for ScriptedTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_owned());
        Ok(())
    }

    fn prompt_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn prompt_secret(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.secrets.pop_front())
    }
}
