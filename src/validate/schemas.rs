//! The per-endpoint schema set.

use super::{FieldSpec, FieldType, Schema};
use crate::models::LeaderboardCategory;

/// `GET /user` query: a user id, optionally narrowed to one season.
pub static USER_QUERY: Schema = Schema {
    fields: &[
        FieldSpec {
            name: "user",
            ty: FieldType::String,
            required: true,
        },
        FieldSpec {
            name: "season",
            ty: FieldType::Integer,
            required: false,
        },
    ],
};

/// `POST /match` body.
pub static ADD_MATCH: Schema = Schema {
    fields: &[
        FieldSpec {
            name: "winner",
            ty: FieldType::String,
            required: true,
        },
        FieldSpec {
            name: "loser",
            ty: FieldType::String,
            required: true,
        },
        FieldSpec {
            name: "score",
            ty: FieldType::ScorePair,
            required: true,
        },
        FieldSpec {
            name: "date",
            ty: FieldType::DateTime,
            required: false,
        },
        FieldSpec {
            name: "season",
            ty: FieldType::Integer,
            required: false,
        },
    ],
};

/// `GET /leaderboard` query: an optional category key.
pub static LEADERBOARD_QUERY: Schema = Schema {
    fields: &[FieldSpec {
        name: "category",
        ty: FieldType::Enum(&LeaderboardCategory::KEYS),
        required: false,
    }],
};
