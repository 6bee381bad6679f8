//! PostgreSQL Repository Implementations

use crate::domain::entities::{OptionTally, Poll, PollOption, PollTally, Vote};
use crate::domain::repository::{PollRepository, VoteRepository};
use crate::domain::services::{PollDeletion, VoteAdmission};
use crate::domain::value_objects::{OptionText, Question};
use crate::error::PollResult;
use chrono::{DateTime, Utc};
use kernel::id::{PollId, PollOptionId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgPollRepository {
    pool: PgPool,
}

impl PgPollRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PollRepository for PgPollRepository {
    async fn create_with_options(&self, poll: &Poll) -> PollResult<()> {
        // Dropping `tx` without commit rolls the whole unit back
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO polls (
                poll_id,
                owner_user_id,
                question,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(poll.id.as_uuid())
        .bind(poll.owner_id.as_uuid())
        .bind(poll.question.as_str())
        .bind(poll.created_at)
        .bind(poll.expires_at)
        .execute(&mut *tx)
        .await?;

        let option_ids: Vec<Uuid> = poll.options.iter().map(|o| o.id.into_uuid()).collect();
        let option_texts: Vec<String> = poll
            .options
            .iter()
            .map(|o| o.text.as_str().to_string())
            .collect();
        let option_positions: Vec<i16> = poll.options.iter().map(|o| o.position).collect();

        sqlx::query(
            r#"
            INSERT INTO poll_options (
                poll_option_id,
                poll_id,
                option_text,
                option_position
            )
            SELECT o.poll_option_id, $2, o.option_text, o.option_position
            FROM UNNEST($1::uuid[], $3::text[], $4::int2[])
                AS o(poll_option_id, option_text, option_position)
            "#,
        )
        .bind(&option_ids)
        .bind(poll.id.as_uuid())
        .bind(&option_texts)
        .bind(&option_positions)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(poll_id = %poll.id, options = option_ids.len(), "Poll rows committed");

        Ok(())
    }

    async fn delete_owned(&self, poll_id: PollId, requester: UserId) -> PollResult<PollDeletion> {
        let (poll_exists, is_owner, deleted) = sqlx::query_as::<_, (bool, bool, bool)>(
            r#"
            WITH
                target AS (
                    SELECT (owner_user_id = $2) AS owned
                    FROM polls
                    WHERE poll_id = $1
                ),
                removed AS (
                    DELETE FROM polls
                    WHERE poll_id = $1 AND owner_user_id = $2
                    RETURNING 1
                )
            SELECT
                EXISTS (SELECT 1 FROM target)                       AS poll_exists,
                COALESCE((SELECT owned FROM target), false)         AS is_owner,
                EXISTS (SELECT 1 FROM removed)                      AS deleted
            "#,
        )
        .bind(poll_id.as_uuid())
        .bind(requester.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(PollDeletion {
            poll_exists,
            is_owner,
            deleted,
        })
    }

    async fn find_with_options(&self, poll_id: PollId) -> PollResult<Option<Poll>> {
        let rows = sqlx::query_as::<_, PollOptionRow>(
            r#"
            SELECT
                p.poll_id,
                p.owner_user_id,
                p.question,
                p.created_at,
                p.expires_at,
                o.poll_option_id,
                o.option_text,
                o.option_position
            FROM polls p
            LEFT JOIN poll_options o ON o.poll_id = p.poll_id
            WHERE p.poll_id = $1
            ORDER BY o.option_position ASC
            "#,
        )
        .bind(poll_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let mut rows = rows.into_iter();
        let Some(first) = rows.next() else {
            return Ok(None);
        };

        let mut poll = first.header();
        poll.options.extend(first.into_option());
        poll.options.extend(rows.filter_map(PollOptionRow::into_option));

        Ok(Some(poll))
    }

    async fn find_by_owner_with_tally(&self, owner_id: UserId) -> PollResult<Vec<PollTally>> {
        // One statement, one snapshot: a poll is never returned with only
        // part of its options.
        let rows = sqlx::query_as::<_, OptionTallyRow>(
            r#"
            SELECT
                p.poll_id,
                p.owner_user_id,
                p.question,
                p.created_at,
                p.expires_at,
                o.poll_option_id,
                o.option_text,
                o.option_position,
                COUNT(v.poll_vote_id) AS vote_count
            FROM polls p
            JOIN poll_options o ON o.poll_id = p.poll_id
            LEFT JOIN poll_votes v ON v.poll_option_id = o.poll_option_id
            WHERE p.owner_user_id = $1
            GROUP BY p.poll_id, o.poll_option_id
            ORDER BY p.created_at DESC, p.poll_id, o.option_position ASC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let mut polls: Vec<PollTally> = Vec::new();
        for row in rows {
            match polls.last_mut() {
                Some(poll) if poll.id.as_uuid() == &row.poll_id => {
                    poll.options.push(row.into_option_tally());
                }
                _ => {
                    let mut poll = row.header();
                    poll.options.push(row.into_option_tally());
                    polls.push(poll);
                }
            }
        }

        Ok(polls)
    }
}

impl VoteRepository for PgPollRepository {
    async fn record(&self, vote: &Vote, now: DateTime<Utc>) -> PollResult<VoteAdmission> {
        let result = sqlx::query_as::<_, (bool, bool, bool, bool)>(
            r#"
            WITH
                poll_found AS (
                    SELECT expires_at
                    FROM polls
                    WHERE poll_id = $2
                ),
                poll_active AS (
                    SELECT 1
                    FROM poll_found
                    WHERE expires_at > $5
                ),
                option_valid AS (
                    SELECT 1
                    FROM poll_options
                    WHERE poll_option_id = $3 AND poll_id = $2
                ),
                inserted AS (
                    INSERT INTO poll_votes (poll_vote_id, poll_id, poll_option_id, voted_at)
                    SELECT $1, $2, $3, $4
                    WHERE
                        EXISTS (SELECT 1 FROM poll_active) AND
                        EXISTS (SELECT 1 FROM option_valid)
                    RETURNING 1
                )
            SELECT
                EXISTS (SELECT 1 FROM poll_found)   AS poll_exists,
                EXISTS (SELECT 1 FROM poll_active)  AS poll_active,
                EXISTS (SELECT 1 FROM option_valid) AS option_valid,
                EXISTS (SELECT 1 FROM inserted)     AS inserted
            "#,
        )
        .bind(vote.id.as_uuid())
        .bind(vote.poll_id.as_uuid())
        .bind(vote.option_id.as_uuid())
        .bind(vote.voted_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok((poll_exists, poll_active, option_valid, inserted)) => Ok(VoteAdmission {
                poll_exists,
                poll_active,
                option_valid,
                inserted,
            }),
            // The poll was deleted and committed after this statement's
            // snapshot was taken; the foreign key refuses the orphan.
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                tracing::debug!(poll_id = %vote.poll_id, "Poll deleted during vote admission");
                Ok(VoteAdmission::POLL_GONE)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct PollOptionRow {
    poll_id: Uuid,
    owner_user_id: Uuid,
    question: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    poll_option_id: Option<Uuid>,
    option_text: Option<String>,
    option_position: Option<i16>,
}

impl PollOptionRow {
    fn header(&self) -> Poll {
        Poll {
            id: PollId::from_uuid(self.poll_id),
            owner_id: UserId::from_uuid(self.owner_user_id),
            question: Question::from_db(self.question.clone()),
            created_at: self.created_at,
            expires_at: self.expires_at,
            options: Vec::new(),
        }
    }

    fn into_option(self) -> Option<PollOption> {
        match (self.poll_option_id, self.option_text, self.option_position) {
            (Some(id), Some(text), Some(position)) => Some(PollOption {
                id: PollOptionId::from_uuid(id),
                poll_id: PollId::from_uuid(self.poll_id),
                text: OptionText::from_db(text),
                position,
            }),
            _ => None,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OptionTallyRow {
    poll_id: Uuid,
    owner_user_id: Uuid,
    question: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    poll_option_id: Uuid,
    option_text: String,
    option_position: i16,
    vote_count: i64,
}

impl OptionTallyRow {
    fn header(&self) -> PollTally {
        PollTally {
            id: PollId::from_uuid(self.poll_id),
            owner_id: UserId::from_uuid(self.owner_user_id),
            question: Question::from_db(self.question.clone()),
            created_at: self.created_at,
            expires_at: self.expires_at,
            options: Vec::new(),
        }
    }

    fn into_option_tally(self) -> OptionTally {
        OptionTally {
            id: PollOptionId::from_uuid(self.poll_option_id),
            poll_id: PollId::from_uuid(self.poll_id),
            text: OptionText::from_db(self.option_text),
            position: self.option_position,
            vote_count: self.vote_count,
        }
    }
}
