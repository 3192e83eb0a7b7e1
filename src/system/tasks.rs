//! 백그라운드 jj 작업
//!
//! tokio 런타임에서 프로세스를 실행하고 결과를 채널로 돌려준다.
//! 메인 루프는 매 프레임 [`TaskQueue::drain`]으로 결과를 수거한다.

use crate::system::jj::{self, JjCommand};
use crate::system::runner::{background_env, JjRunner};
use crate::utils::error::{JjDetailsError, Result};
use std::future::Future;
use std::process::Stdio;
use std::sync::mpsc::{self, Receiver, Sender};
use tokio::runtime::Runtime;

/// 실행 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task<E> {
    /// 스냅샷 후 상태 조회 (change id 태그 부착)
    Load { change_id: String },
    /// 변경 명령, 성공 시 `on_success` 적용
    Command {
        command: JjCommand,
        on_success: Vec<E>,
    },
}

/// 작업 결과
#[derive(Debug)]
pub enum TaskOutcome<E> {
    StatusLoaded {
        change_id: String,
        summary: String,
    },
    LoadFailed {
        change_id: String,
        error: JjDetailsError,
    },
    CommandSucceeded {
        command: JjCommand,
        on_success: Vec<E>,
    },
    CommandFailed {
        command: JjCommand,
        error: JjDetailsError,
    },
}

/// 백그라운드 작업 큐
///
/// 메인 루프는 이 인터페이스만 사용하므로 테스트에서 기록용 큐로 바꿀 수 있다.
pub trait TaskQueue<E> {
    fn spawn(&mut self, task: Task<E>);
    /// 완료된 작업 결과를 모두 꺼냄 (블로킹 없음)
    fn drain(&mut self) -> Vec<TaskOutcome<E>>;
    /// 실행 중인 작업 수
    fn in_flight(&self) -> usize;
}

/// tokio 기반 작업 큐
pub struct TaskRunner<E> {
    runtime: Runtime,
    runner: JjRunner,
    tx: Sender<TaskOutcome<E>>,
    rx: Receiver<TaskOutcome<E>>,
    in_flight: usize,
}

impl<E: Send + 'static> TaskRunner<E> {
    pub fn new(runner: JjRunner) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            runtime,
            runner,
            tx,
            rx,
            in_flight: 0,
        })
    }

    /// 작업을 띄우고 결과를 채널로 보낸다
    ///
    /// 작업이 패닉하면 `on_panic`으로 만든 실패 결과를 대신 보내므로
    /// `in_flight`는 항상 줄어든다.
    fn spawn_reporting<F, P>(&mut self, work: F, on_panic: P)
    where
        F: Future<Output = TaskOutcome<E>> + Send + 'static,
        P: FnOnce(JjDetailsError) -> TaskOutcome<E> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;

        let handle = self.runtime.spawn(work);
        self.runtime.spawn(async move {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::error!("background task aborted: {}", err);
                    on_panic(std::io::Error::from(err).into())
                }
            };
            let _ = tx.send(outcome);
        });
    }
}

impl<E: Send + 'static> TaskQueue<E> for TaskRunner<E> {
    fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn spawn(&mut self, task: Task<E>) {
        let runner = self.runner.clone();

        match task {
            Task::Load { change_id } => {
                log::debug!("loading status for {}", change_id);
                let tag = change_id.clone();
                self.spawn_reporting(
                    async move {
                        match load_status(&runner, &change_id).await {
                            Ok(summary) => TaskOutcome::StatusLoaded { change_id, summary },
                            Err(error) => TaskOutcome::LoadFailed { change_id, error },
                        }
                    },
                    move |error| TaskOutcome::LoadFailed {
                        change_id: tag,
                        error,
                    },
                );
            }
            Task::Command {
                command,
                on_success,
            } => {
                log::info!("running: {}", command.display());
                let failed = command.clone();
                self.spawn_reporting(
                    async move {
                        match run_async(&runner, &command).await {
                            Ok(_) => TaskOutcome::CommandSucceeded {
                                command,
                                on_success,
                            },
                            Err(error) => TaskOutcome::CommandFailed { command, error },
                        }
                    },
                    move |error| TaskOutcome::CommandFailed {
                        command: failed,
                        error,
                    },
                );
            }
        }
    }

    fn drain(&mut self) -> Vec<TaskOutcome<E>> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            outcomes.push(outcome);
        }
        outcomes
    }
}

async fn load_status(runner: &JjRunner, change_id: &str) -> Result<String> {
    run_async(runner, &jj::snapshot()).await?;
    run_async(runner, &jj::status(change_id)).await
}

async fn run_async(runner: &JjRunner, command: &JjCommand) -> Result<String> {
    let mut cmd = tokio::process::Command::new(runner.binary());
    cmd.args(runner.full_args(command))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in background_env() {
        cmd.env(key, value);
    }
    let output = cmd.output().await?;
    crate::system::runner::output_to_result(command, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for<E: Send + 'static>(tasks: &mut TaskRunner<E>) -> Vec<TaskOutcome<E>> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let outcomes = tasks.drain();
            if !outcomes.is_empty() || Instant::now() > deadline {
                return outcomes;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_missing_binary_reports_load_failure() {
        let mut tasks: TaskRunner<()> =
            TaskRunner::new(JjRunner::new("jjdetails-test-no-such-binary", None)).unwrap();
        tasks.spawn(Task::Load {
            change_id: "abc".to_string(),
        });
        assert_eq!(tasks.in_flight(), 1);

        let outcomes = wait_for(&mut tasks);
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            TaskOutcome::LoadFailed { change_id, .. } => assert_eq!(change_id, "abc"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(tasks.in_flight(), 0);
    }

    async fn explode() -> TaskOutcome<()> {
        panic!("task exploded")
    }

    #[test]
    fn test_panicking_task_still_reports_and_settles() {
        let mut tasks: TaskRunner<()> =
            TaskRunner::new(JjRunner::new("jjdetails-test-no-such-binary", None)).unwrap();
        tasks.spawn_reporting(explode(), |error| TaskOutcome::LoadFailed {
            change_id: "abc".to_string(),
            error,
        });
        assert_eq!(tasks.in_flight(), 1);

        let outcomes = wait_for(&mut tasks);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            &outcomes[0],
            TaskOutcome::LoadFailed {
                error: JjDetailsError::Io(_),
                ..
            }
        ));
        assert_eq!(tasks.in_flight(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_success_carries_effects() {
        let mut tasks: TaskRunner<u8> = TaskRunner::new(JjRunner::new("true", None)).unwrap();
        tasks.spawn(Task::Command {
            command: jj::snapshot(),
            on_success: vec![7],
        });

        let outcomes = wait_for(&mut tasks);
        match &outcomes[0] {
            TaskOutcome::CommandSucceeded { on_success, .. } => assert_eq!(on_success, &vec![7]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failure_is_reported() {
        let mut tasks: TaskRunner<u8> = TaskRunner::new(JjRunner::new("false", None)).unwrap();
        tasks.spawn(Task::Command {
            command: jj::snapshot(),
            on_success: vec![1],
        });

        let outcomes = wait_for(&mut tasks);
        assert!(matches!(
            outcomes[0],
            TaskOutcome::CommandFailed {
                error: JjDetailsError::Command { .. },
                ..
            }
        ));
    }
}
