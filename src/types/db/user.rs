use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    // Always stored lowercased; the unique index therefore enforces
    // case-insensitive uniqueness
    #[sea_orm(unique)]
    pub email: String,
    pub password_digest: String,

    // HMAC-SHA256 digest of the persistent "remember me" token
    pub remember_digest: Option<String>,

    // Account activation
    pub activation_digest: Option<String>,
    pub activated: bool,
    pub activated_at: Option<i64>,

    pub admin: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::micropost::Entity")]
    Microposts,
}

impl Related<super::micropost::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Microposts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
