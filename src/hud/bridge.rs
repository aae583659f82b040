//! Scripting bridge commands
//!
//! Scripts talk to the HUD through [`HudCommand`]s. They may be produced on
//! any thread through a [`CommandSender`]; the render thread drains the
//! [`CommandQueue`] once per frame, so the element store keeps a single
//! writer.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::element::{HudElementDef, HudStat, StatUpdate};
use super::store::HudId;
use crate::error::HudError;

/// A stat named either by its snake_case name or its numeric wire id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatRef {
    Id(u8),
    Name(HudStat),
}

impl StatRef {
    pub fn resolve(self) -> Result<HudStat, HudError> {
        match self {
            StatRef::Id(id) => HudStat::try_from(id),
            StatRef::Name(stat) => Ok(stat),
        }
    }
}

impl From<HudStat> for StatRef {
    fn from(stat: HudStat) -> Self {
        StatRef::Name(stat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotbarParam {
    ItemCount(i32),
    Image(String),
    SelectedImage(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HudCommand {
    Add {
        element: HudElementDef,
    },
    Remove {
        id: HudId,
    },
    Change {
        id: HudId,
        stat: StatRef,
        value: Value,
    },
    Hotbar {
        param: HotbarParam,
    },
}

impl HudCommand {
    pub fn from_json(json: &str) -> Result<Self, HudError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a typed `change` command
    pub fn change(id: HudId, update: &StatUpdate) -> Self {
        HudCommand::Change {
            id,
            stat: update.stat().into(),
            value: update.to_value(),
        }
    }
}

/// Cloneable producer end of a [`CommandQueue`]
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<HudCommand>,
}

impl CommandSender {
    /// Queues a command; false if the HUD has been dropped
    pub fn send(&self, command: HudCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

#[derive(Debug)]
pub struct CommandQueue {
    tx: Sender<HudCommand>,
    rx: Receiver<HudCommand>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        CommandQueue { tx, rx }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    /// Everything queued so far, in send order, without blocking
    pub fn drain(&self) -> Vec<HudCommand> {
        self.rx.try_iter().collect()
    }
}
