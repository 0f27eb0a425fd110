use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::types::Word;

/// A word about to be inserted by the daily-addition job.
#[derive(Debug, Clone)]
pub struct NewWord {
    pub id: String,
    pub word: String,
    pub meaning: String,
    pub sentence: String,
    pub date: NaiveDate,
}

pub async fn select_words_by_date(
    pool: &PgPool,
    date: NaiveDate,
) -> Result<Vec<Word>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "word", "meaning", "sentence", "date"
        FROM "words"
        WHERE "date" = $1
        ORDER BY "word" ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_word_row).collect())
}

pub async fn select_all_spellings(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT "word" FROM "words""#)
        .fetch_all(pool)
        .await
}

pub async fn insert_words(pool: &PgPool, words: &[NewWord]) -> Result<(), sqlx::Error> {
    for word in words {
        sqlx::query(
            r#"
            INSERT INTO "words" ("id", "word", "meaning", "sentence", "date")
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&word.id)
        .bind(&word.word)
        .bind(&word.meaning)
        .bind(&word.sentence)
        .bind(word.date)
        .execute(pool)
        .await?;
    }
    Ok(())
}

fn map_word_row(row: &PgRow) -> Word {
    Word {
        id: row.try_get("id").unwrap_or_default(),
        word: row.try_get("word").unwrap_or_default(),
        meaning: row.try_get("meaning").unwrap_or_default(),
        sentence: row.try_get("sentence").unwrap_or_default(),
        date: row
            .try_get("date")
            .unwrap_or_else(|_| chrono::Utc::now().date_naive()),
    }
}
