mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "usergate",
    "m0001",
    vec_box![],
    vec_box![user::CreateTable, user::CreateUk1]
);
