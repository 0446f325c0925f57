use chrono::{DateTime, Utc};

use crate::codec::{self, UrlHash};
use crate::errors::{Result, ShorturlError};
use crate::storage::models::{NewShortLink, NewVisit, ShortLink, VisitEvent};
use migration::entities::{short_url, visit};

/// 将 Sea-ORM Model 转换为 ShortLink
pub fn model_to_shortlink(model: short_url::Model) -> Result<ShortLink> {
    let hash = UrlHash::parse(&model.hash_value).map_err(|_| {
        ShorturlError::storage(format!(
            "short_url {} has a corrupt hash_value '{}'",
            model.id, model.hash_value
        ))
    })?;

    Ok(ShortLink {
        id: model.id,
        url: model.url,
        hash,
        owner_id: model.owner_id,
        visit_count: model.request_count.max(0) as u64,
        created_at: model.created_at,
        expires_at: model.expires_at,
        deleted_at: model.deleted_at,
    })
}

/// 构建插入用的 ActiveModel
pub fn new_link_to_active_model(link: &NewShortLink, now: DateTime<Utc>) -> short_url::ActiveModel {
    use sea_orm::ActiveValue::*;

    short_url::ActiveModel {
        id: NotSet,
        url: Set(link.url.clone()),
        hash_value: Set(link.hash.as_str().to_string()),
        owner_id: Set(link.owner_id),
        request_count: Set(0),
        expires_at: Set(link.expires_at),
        deleted_at: Set(None),
        created_at: Set(now),
        active_digest: Set(Some(codec::url_digest(&link.url))),
    }
}

pub fn new_visit_to_active_model(visit: &NewVisit) -> visit::ActiveModel {
    use sea_orm::ActiveValue::*;

    visit::ActiveModel {
        id: NotSet,
        short_url_id: Set(visit.link_id),
        referrer: Set(visit.referrer.clone()),
        visited_at: Set(visit.visited_at),
    }
}

pub fn model_to_visit_event(model: visit::Model) -> VisitEvent {
    VisitEvent {
        id: model.id,
        link_id: model.short_url_id,
        referrer: model.referrer,
        visited_at: model.visited_at,
    }
}
