// ==========================================
// 库存可视化看板 - 分页
// ==========================================
// 页码从 1 开始；总页数至少为 1
// 当前页在读取时按总行数夹紧，行数变化不会越界
// ==========================================

/// 分页器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 总页数: max(1, ceil(total / page_size))
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// 当前页（已夹紧到 [1, page_count]）
    pub fn current_page(&self, total: usize) -> usize {
        self.page.clamp(1, self.page_count(total))
    }

    /// 当前页首行的全局序号偏移（表格行号用）
    pub fn offset(&self, total: usize) -> usize {
        (self.current_page(total) - 1) * self.page_size
    }

    /// 截取当前页的行
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset(items.len()).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// 跳转到指定页（夹紧）
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, self.page_count(total));
    }

    pub fn first(&mut self) {
        self.page = 1;
    }

    pub fn prev(&mut self, total: usize) {
        let current = self.current_page(total);
        self.page = current.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, total: usize) {
        let current = self.current_page(total);
        self.page = (current + 1).min(self.page_count(total));
    }

    pub fn last(&mut self, total: usize) {
        self.page = self.page_count(total);
    }

    /// 过滤条件变化时回到第一页
    pub fn reset(&mut self) {
        self.first();
    }
}
