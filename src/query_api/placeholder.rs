//! Canned demo content shown before anything has been generated.

pub const HOMEPAGE_QUERY: &str = "Show me users who purchased more than $500 last month";

pub const HOMEPAGE_SQL: &str = "SELECT u.username, u.email, SUM(o.total) as total_spent
FROM users u
JOIN orders o ON u.id = o.user_id
WHERE o.created_at >= DATE_SUB(CURDATE(), INTERVAL 1 MONTH)
GROUP BY u.id
HAVING total_spent > 500;";

pub const CONVERTER_QUERY: &str = "Show me the top-performing products by revenue for each category including year-over-year growth";

pub const CONVERTER_GENERATED: &str = "```sql
SELECT
    CategoryID,
    ProductID,
    Year,
    Revenue,
    LAG(Revenue, 1) OVER (PARTITION BY CategoryID, ProductID ORDER BY Year) AS PreviousYearRevenue,
    (Revenue - LAG(Revenue, 1) OVER (PARTITION BY CategoryID, ProductID ORDER BY Year)) / LAG(Revenue, 1) OVER (PARTITION BY CategoryID, ProductID ORDER BY Year) * 100 AS YearOverYearGrowth
FROM
    Sales
ORDER BY
    CategoryID,
    Revenue DESC;
```";
