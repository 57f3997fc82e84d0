//! Property-based tests for the contact relationship state machine
//!
//! Random sequences of create/respond/withdraw/delete are run against the
//! workflow and against a small in-memory model. After every step the
//! outcome and the stored pairs must agree with the model.

use std::collections::BTreeSet;

use pocketchat::backend::messaging::workflow::{
    create_request, delete_contact, respond_to_request, withdraw_request, Answer, Selector,
};
use pocketchat::backend::middleware::AuthenticatedMember;
use pocketchat::backend::notifications::Notifier;
use pocketchat::shared::{ErrorKind, MemberId};
use proptest::prelude::*;
use sqlx::SqlitePool;

use crate::common::{create_test_member, create_test_pool};

#[derive(Debug, Clone, Copy)]
enum Op {
    Create { from: usize, to: usize },
    Respond { responder: usize, requester: usize, accept: bool },
    Withdraw { from: usize, to: usize },
    Delete { from: usize, other: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    (0..4u8, 0..3usize, 0..3usize, any::<bool>()).prop_map(|(kind, a, b, accept)| match kind {
        0 => Op::Create { from: a, to: b },
        1 => Op::Respond { responder: a, requester: b, accept },
        2 => Op::Withdraw { from: a, to: b },
        _ => Op::Delete { from: a, other: b },
    })
}

#[derive(Default)]
struct Model {
    contacts: BTreeSet<(MemberId, MemberId)>,
    requests: BTreeSet<(MemberId, MemberId)>,
}

fn pair(a: MemberId, b: MemberId) -> (MemberId, MemberId) {
    (a.min(b), a.max(b))
}

impl Model {
    fn create(&mut self, from: MemberId, to: MemberId) -> Result<(), ErrorKind> {
        if from == to {
            return Err(ErrorKind::SelfReference);
        }
        if self.contacts.contains(&pair(from, to)) {
            return Err(ErrorKind::AlreadyContacts);
        }
        if !self.requests.insert((from, to)) {
            return Err(ErrorKind::DuplicateRequest);
        }
        Ok(())
    }

    fn respond(&mut self, responder: MemberId, requester: MemberId, accept: bool) -> Result<(), ErrorKind> {
        if !self.requests.contains(&(requester, responder)) {
            return Err(ErrorKind::RequestNotFound);
        }
        if accept {
            self.contacts.insert(pair(requester, responder));
        }
        self.requests.remove(&(requester, responder));
        self.requests.remove(&(responder, requester));
        Ok(())
    }
}

async fn stored(pool: &SqlitePool) -> Model {
    let contacts: Vec<(MemberId, MemberId)> =
        sqlx::query_as("SELECT memberid_a, memberid_b FROM contacts")
            .fetch_all(pool)
            .await
            .unwrap();
    let requests: Vec<(MemberId, MemberId)> =
        sqlx::query_as("SELECT memberid_a, memberid_b FROM contact_requests")
            .fetch_all(pool)
            .await
            .unwrap();
    Model {
        contacts: contacts.into_iter().map(|(a, b)| pair(a, b)).collect(),
        requests: requests.into_iter().collect(),
    }
}

async fn run(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let pool = create_test_pool().await;
    let (notifier, _rx) = Notifier::channel();
    let mut members = Vec::new();
    for nickname in ["ann", "ben", "cat"] {
        let member = create_test_member(&pool, nickname).await;
        members.push(AuthenticatedMember {
            member_id: member.id,
            nickname: member.nickname,
            email: member.email,
        });
    }

    let mut model = Model::default();
    for op in ops {
        let (actual, expected) = match op {
            Op::Create { from, to } => {
                let selector = Selector::Member(members[to].member_id);
                let actual = create_request(&pool, &notifier, &members[from], &selector)
                    .await
                    .map(|_| ());
                (actual, model.create(members[from].member_id, members[to].member_id))
            }
            Op::Respond { responder, requester, accept } => {
                let answer = Answer {
                    requester: members[requester].member_id,
                    accept,
                };
                let actual = respond_to_request(&pool, &notifier, &members[responder], answer).await;
                let expected =
                    model.respond(members[responder].member_id, members[requester].member_id, accept);
                (actual, expected)
            }
            Op::Withdraw { from, to } => {
                let actual =
                    withdraw_request(&pool, &notifier, &members[from], members[to].member_id).await;
                model.requests.remove(&(members[from].member_id, members[to].member_id));
                (actual, Ok(()))
            }
            Op::Delete { from, other } => {
                let actual =
                    delete_contact(&pool, &notifier, &members[from], members[other].member_id).await;
                model.contacts.remove(&pair(members[from].member_id, members[other].member_id));
                (actual, Ok(()))
            }
        };

        let actual = actual.map_err(|e| e.kind().cloned());
        prop_assert_eq!(actual, expected.map_err(Some), "after {:?}", op);

        let state = stored(&pool).await;
        prop_assert_eq!(&state.contacts, &model.contacts);
        prop_assert_eq!(&state.requests, &model.requests);
        for (a, b) in &state.requests {
            prop_assert!(!state.contacts.contains(&pair(*a, *b)), "request alongside contact");
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_workflow_matches_model(ops in proptest::collection::vec(op_strategy(), 1..25)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(run(ops))?;
    }

    #[test]
    fn test_accept_yields_single_contact(accept_twice in any::<bool>()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let pool = create_test_pool().await;
            let (notifier, _rx) = Notifier::channel();
            let a = create_test_member(&pool, "ann").await;
            let b = create_test_member(&pool, "ben").await;
            let ann = AuthenticatedMember { member_id: a.id, nickname: a.nickname, email: a.email };
            let ben = AuthenticatedMember { member_id: b.id, nickname: b.nickname, email: b.email };

            create_request(&pool, &notifier, &ann, &Selector::Member(ben.member_id)).await.unwrap();
            respond_to_request(&pool, &notifier, &ben, Answer { requester: ann.member_id, accept: true })
                .await
                .unwrap();
            if accept_twice {
                let again =
                    respond_to_request(&pool, &notifier, &ben, Answer { requester: ann.member_id, accept: true })
                        .await;
                prop_assert!(again.is_err());
            }

            let state = stored(&pool).await;
            prop_assert_eq!(state.contacts.len(), 1);
            prop_assert!(state.requests.is_empty());
            Ok::<(), TestCaseError>(())
        })?;
    }
}
