//! 销售统计聚合
//!
//! 对当前完整订单集合的纯函数：每次读取都从头重算，不做增量维护。
//! 营收类指标只统计 completed 订单；小时分布统计全部订单 (找出高峰时段)。
//! 日历相关的口径使用本地时区自然日，按创建时间归日。

use std::collections::HashMap;

use chrono::Duration;
use serde::Serialize;
use shared::models::{Order, OrderStatus};

use crate::utils::time;

const REVENUE_HISTORY_DAYS: i64 = 7;
const TOP_ITEMS_LIMIT: usize = 5;

/// 某一个自然日的营收
#[derive(Debug, Clone, Serialize)]
pub struct DailyRevenue {
    /// `YYYY-MM-DD`, local calendar day
    pub date: String,
    pub revenue: f64,
}

/// 按销量排序的菜品条目
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopItem {
    #[serde(rename = "menuItemId")]
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u64,
}

/// 分类销量占比的一个分片
#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub quantity: u64,
}

/// 某个小时桶内的订单数
#[derive(Debug, Clone, Serialize)]
pub struct HourlyBucket {
    /// Hour of day, 0..=23
    pub hour: u32,
    pub orders: u64,
}

/// 聚合后的统计报表
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub today_revenue: f64,
    pub total_revenue: f64,
    pub total_orders: u64,
    /// Oldest day first, always 7 entries ending with today
    pub revenue_history: Vec<DailyRevenue>,
    /// At most 5 entries, quantity descending
    pub top_items: Vec<TopItem>,
    pub category_mix: Vec<CategorySlice>,
    /// Always 24 buckets, hour 0 through 23
    pub hourly: Vec<HourlyBucket>,
    pub average_wait_minutes: i64,
}

/// 计算统计报表
///
/// `now` 以参数传入，便于测试固定"今天"。
pub fn compute(orders: &[Order], now: i64) -> Statistics {
    let completed: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .collect();

    let today_revenue = completed
        .iter()
        .filter(|o| time::same_local_day(o.timestamp, now))
        .map(|o| o.total_price)
        .sum();
    let total_revenue = completed.iter().map(|o| o.total_price).sum();

    Statistics {
        today_revenue,
        total_revenue,
        total_orders: orders.len() as u64,
        revenue_history: revenue_history(&completed, now),
        top_items: top_items(orders),
        category_mix: category_mix(orders),
        hourly: hourly(orders),
        average_wait_minutes: average_wait_minutes(orders),
    }
}

/// 近 7 个自然日 (含今天) 的完成订单营收，从旧到新
fn revenue_history(completed: &[&Order], now: i64) -> Vec<DailyRevenue> {
    let today = time::local_date(now);
    (0..REVENUE_HISTORY_DAYS)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            let revenue = completed
                .iter()
                .filter(|o| time::local_date(o.timestamp) == day)
                .map(|o| o.total_price)
                .sum();
            DailyRevenue {
                date: day.format("%Y-%m-%d").to_string(),
                revenue,
            }
        })
        .collect()
}

/// 按菜品合并销量，取前 5；同量保持首次出现的顺序 (stable sort)
fn top_items(orders: &[Order]) -> Vec<TopItem> {
    let mut totals: Vec<TopItem> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for order in orders {
        for item in &order.items {
            match index.get(item.menu_item_id.as_str()) {
                Some(&i) => totals[i].quantity += u64::from(item.quantity),
                None => {
                    index.insert(item.menu_item_id.as_str(), totals.len());
                    totals.push(TopItem {
                        menu_item_id: item.menu_item_id.clone(),
                        name: item.name.clone(),
                        quantity: u64::from(item.quantity),
                    });
                }
            }
        }
    }

    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(TOP_ITEMS_LIMIT);
    totals
}

/// 按分类合并销量；缺失分类归入 "Other"
fn category_mix(orders: &[Order]) -> Vec<CategorySlice> {
    let mut totals: Vec<CategorySlice> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for order in orders {
        for item in &order.items {
            let label = item.category.clone().unwrap_or_else(|| "Other".to_string());
            match index.get(&label) {
                Some(&i) => totals[i].quantity += u64::from(item.quantity),
                None => {
                    index.insert(label.clone(), totals.len());
                    totals.push(CategorySlice {
                        category: label,
                        quantity: u64::from(item.quantity),
                    });
                }
            }
        }
    }

    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals
}

/// 24 个小时桶的下单数量分布，与日期无关
fn hourly(orders: &[Order]) -> Vec<HourlyBucket> {
    let mut buckets = [0u64; 24];
    for order in orders {
        buckets[time::local_hour(order.timestamp) as usize] += 1;
    }
    buckets
        .iter()
        .enumerate()
        .map(|(hour, &orders)| HourlyBucket {
            hour: hour as u32,
            orders,
        })
        .collect()
}

/// 平均等待分钟数 (completedAt − timestamp 的均值，四舍五入)
fn average_wait_minutes(orders: &[Order]) -> i64 {
    let waits: Vec<i64> = orders
        .iter()
        .filter_map(|o| o.completed_at.map(|done| done - o.timestamp))
        .collect();
    if waits.is_empty() {
        return 0;
    }
    let mean_ms = waits.iter().sum::<i64>() as f64 / waits.len() as f64;
    (mean_ms / 60_000.0).round() as i64
}

/// 厨房备餐汇总的一行
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrepLine {
    pub name: String,
    pub quantity: u64,
}

/// 活跃订单 (pending / in-progress) 的菜品汇总，供厨房批量备餐
pub fn prep_summary(orders: &[Order]) -> Vec<PrepLine> {
    let mut totals: Vec<PrepLine> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for order in orders.iter().filter(|o| !o.status.is_terminal()) {
        for item in &order.items {
            match index.get(&item.name) {
                Some(&i) => totals[i].quantity += u64::from(item.quantity),
                None => {
                    index.insert(item.name.clone(), totals.len());
                    totals.push(PrepLine {
                        name: item.name.clone(),
                        quantity: u64::from(item.quantity),
                    });
                }
            }
        }
    }

    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderItem;

    fn item(id: &str, category: Option<&str>, price: f64, qty: u32) -> OrderItem {
        OrderItem {
            menu_item_id: id.into(),
            name: id.to_uppercase(),
            price,
            quantity: qty,
            category: category.map(Into::into),
            notes: None,
        }
    }

    fn order(
        ts: i64,
        status: OrderStatus,
        completed_at: Option<i64>,
        items: Vec<OrderItem>,
    ) -> Order {
        let total_price = items.iter().map(OrderItem::line_total).sum();
        Order {
            id: format!("o{ts}"),
            table_number: "1".into(),
            items,
            status,
            total_price,
            timestamp: ts,
            completed_at,
            payment_intent_id: None,
            priority: false,
        }
    }

    #[test]
    fn revenue_counts_completed_orders_only() {
        let now = time::now_millis();
        let orders = vec![
            order(
                now,
                OrderStatus::Completed,
                Some(now + 60_000),
                vec![item("burger", Some("Mains"), 10.0, 1)],
            ),
            order(
                now,
                OrderStatus::Pending,
                None,
                vec![item("cola", Some("Drinks"), 3.0, 2)],
            ),
        ];

        let stats = compute(&orders, now);
        assert!((stats.today_revenue - 10.0).abs() < f64::EPSILON);
        assert!((stats.total_revenue - 10.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_orders, 2);
        assert!(stats.total_revenue >= stats.today_revenue);
    }

    #[test]
    fn history_spans_seven_days_oldest_first() {
        let now = time::now_millis();
        let day = 24 * 60 * 60 * 1000;
        let orders = vec![
            order(
                now - 2 * day,
                OrderStatus::Completed,
                Some(now - 2 * day + 1),
                vec![item("soup", Some("Starters"), 6.0, 1)],
            ),
            order(
                now,
                OrderStatus::Completed,
                Some(now + 1),
                vec![item("steak", Some("Mains"), 20.0, 1)],
            ),
            // outside the window, must not appear
            order(
                now - 10 * day,
                OrderStatus::Completed,
                Some(now - 10 * day + 1),
                vec![item("cake", Some("Desserts"), 5.0, 1)],
            ),
        ];

        let stats = compute(&orders, now);
        assert_eq!(stats.revenue_history.len(), 7);
        let total_in_window: f64 = stats.revenue_history.iter().map(|d| d.revenue).sum();
        assert!((total_in_window - 26.0).abs() < f64::EPSILON);
        // last entry is today
        assert!((stats.revenue_history[6].revenue - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn top_items_are_capped_at_five_and_sorted() {
        let now = time::now_millis();
        let mut items = Vec::new();
        for (i, qty) in [3u32, 9, 1, 7, 5, 2].iter().enumerate() {
            items.push(item(&format!("m{i}"), None, 1.0, *qty));
        }
        let orders = vec![order(now, OrderStatus::Pending, None, items)];

        let stats = compute(&orders, now);
        assert_eq!(stats.top_items.len(), 5);
        assert!(
            stats
                .top_items
                .windows(2)
                .all(|w| w[0].quantity >= w[1].quantity)
        );
        assert_eq!(stats.top_items[0].quantity, 9);
        // qty 1 is the one that falls off
        assert!(stats.top_items.iter().all(|t| t.quantity > 1));
    }

    #[test]
    fn missing_category_lands_in_other() {
        let now = time::now_millis();
        let orders = vec![order(
            now,
            OrderStatus::Pending,
            None,
            vec![
                item("fries", None, 4.0, 3),
                item("cola", Some("Drinks"), 3.0, 1),
            ],
        )];

        let stats = compute(&orders, now);
        let other = stats
            .category_mix
            .iter()
            .find(|c| c.category == "Other")
            .expect("Other bucket");
        assert_eq!(other.quantity, 3);
    }

    #[test]
    fn hourly_buckets_account_for_every_order() {
        let now = time::now_millis();
        let orders: Vec<Order> = (0..5)
            .map(|i| {
                order(
                    now - i * 3_600_000,
                    OrderStatus::Pending,
                    None,
                    vec![item("tea", None, 2.0, 1)],
                )
            })
            .collect();

        let stats = compute(&orders, now);
        assert_eq!(stats.hourly.len(), 24);
        let counted: u64 = stats.hourly.iter().map(|b| b.orders).sum();
        assert_eq!(counted, orders.len() as u64);
    }

    #[test]
    fn average_wait_rounds_to_minutes_and_defaults_to_zero() {
        let now = time::now_millis();
        assert_eq!(
            compute(
                &[order(
                    now,
                    OrderStatus::Pending,
                    None,
                    vec![item("tea", None, 2.0, 1)]
                )],
                now
            )
            .average_wait_minutes,
            0
        );

        // 10 and 20 minute waits average to 15
        let orders = vec![
            order(
                now,
                OrderStatus::Completed,
                Some(now + 10 * 60_000),
                vec![item("tea", None, 2.0, 1)],
            ),
            order(
                now,
                OrderStatus::Completed,
                Some(now + 20 * 60_000),
                vec![item("tea", None, 2.0, 1)],
            ),
        ];
        assert_eq!(compute(&orders, now).average_wait_minutes, 15);
    }

    #[test]
    fn prep_summary_covers_active_orders_only() {
        let now = time::now_millis();
        let orders = vec![
            order(
                now,
                OrderStatus::Pending,
                None,
                vec![item("burger", None, 9.0, 2)],
            ),
            order(
                now,
                OrderStatus::InProgress,
                None,
                vec![item("burger", None, 9.0, 1), item("cola", None, 3.0, 1)],
            ),
            order(
                now,
                OrderStatus::Completed,
                Some(now),
                vec![item("burger", None, 9.0, 5)],
            ),
        ];

        let summary = prep_summary(&orders);
        assert_eq!(
            summary[0],
            PrepLine {
                name: "BURGER".into(),
                quantity: 3
            }
        );
        assert_eq!(summary.len(), 2);
    }
}
