//! Dashboard actor: one task owns the controller and applies user events and
//! I/O completions in arrival order. Requests run in their own tasks and post
//! their completion back through the same channel.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::clients::ManagementApi;
use crate::models::views::DashboardPage;

use super::DashboardError;
use super::controller::{Command, Completion, DashboardController, UserEvent};

const CHANNEL_CAPACITY: usize = 64;

pub enum DashboardMsg {
    User(UserEvent),
    Completed(Completion),
    Render {
        reply: oneshot::Sender<DashboardPage>,
    },
}

#[derive(Clone)]
pub struct DashboardHandle {
    tx: mpsc::Sender<DashboardMsg>,
}

impl DashboardHandle {
    pub async fn send(&self, event: UserEvent) -> Result<(), DashboardError> {
        self.tx
            .send(DashboardMsg::User(event))
            .await
            .map_err(|_| DashboardError::Unavailable)
    }

    pub async fn page(&self) -> Result<DashboardPage, DashboardError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(DashboardMsg::Render { reply })
            .await
            .map_err(|_| DashboardError::Unavailable)?;
        rx.await.map_err(|_| DashboardError::Unavailable)
    }
}

#[cfg(test)]
impl DashboardHandle {
    /// A handle whose messages go to `tx` instead of a running actor.
    pub fn from_sender(tx: mpsc::Sender<DashboardMsg>) -> Self {
        Self { tx }
    }
}

pub struct DashboardActor<A> {
    controller: DashboardController,
    api: Arc<A>,
    rx: mpsc::Receiver<DashboardMsg>,
    tx: mpsc::Sender<DashboardMsg>,
}

impl<A: ManagementApi> DashboardActor<A> {
    pub fn spawn(
        controller: DashboardController,
        api: Arc<A>,
        shutdown: watch::Receiver<()>,
    ) -> (DashboardHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let actor = Self {
            controller,
            api,
            rx,
            tx: tx.clone(),
        };
        let task = tokio::spawn(actor.run(shutdown));
        (DashboardHandle { tx }, task)
    }

    async fn run(mut self, mut shutdown: watch::Receiver<()>) {
        let commands = self.controller.start();
        self.execute(commands);

        loop {
            tokio::select! {
                msg = self.rx.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => return,
                },
                _ = shutdown.changed() => {
                    info!("dashboard shutting down");
                    return;
                }
            }
        }
    }

    fn handle(&mut self, msg: DashboardMsg) {
        let commands = match msg {
            DashboardMsg::User(event) => self.controller.handle_user(event),
            DashboardMsg::Completed(completion) => self.controller.handle_completion(completion),
            DashboardMsg::Render { reply } => {
                let _ = reply.send(self.controller.render());
                Vec::new()
            }
        };
        self.execute(commands);
    }

    fn execute(&self, commands: Vec<Command>) {
        for command in commands {
            let api = self.api.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let completion = perform(api.as_ref(), command).await;
                // The actor may be gone by now; a late completion is simply dropped.
                if tx.send(DashboardMsg::Completed(completion)).await.is_err() {
                    debug!("dashboard stopped, dropping completion");
                }
            });
        }
    }
}

async fn perform<A: ManagementApi>(api: &A, command: Command) -> Completion {
    match command {
        Command::FetchClusters(ticket) => Completion::ClustersFetched {
            ticket,
            result: api.list_clusters().await,
        },
        Command::LoadSession(ticket) => {
            let (user, app) = futures_util::future::join(api.user_info(), api.app_info()).await;
            Completion::SessionLoaded { ticket, user, app }
        }
        Command::DeleteAppConfig(cluster) => match api.delete_app_config(&cluster).await {
            Ok(()) => Completion::DeleteSucceeded { cluster },
            Err(error) => Completion::DeleteFailed { cluster, error },
        },
    }
}
