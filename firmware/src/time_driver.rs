//! Embassy time driver on the CH32V203 SysTick, one tick per millisecond

use core::cell::Cell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;
use embassy_time_driver::{AlarmHandle, Driver};
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Core clock after reset (HSI)
pub const HCLK_HZ: u32 = 8_000_000;

const SYSTICK_BASE: usize = 0xE000_F000;
const STK_CTLR: usize = SYSTICK_BASE;
const STK_SR: usize = SYSTICK_BASE + 0x04;
const STK_CNTL: usize = SYSTICK_BASE + 0x08;
const STK_CMPLR: usize = SYSTICK_BASE + 0x10;

/// STE | STIE | STCLK (HCLK) | STRE (auto reload)
const STK_CTLR_RUN: u32 = 0b1111;

/// PFIC interrupt enable register 0, SysTick is IRQ 12
const PFIC_IENR0: usize = 0xE000_E100;
const SYSTICK_IRQ: u32 = 12;

struct Alarm {
    timestamp: Cell<u64>,
    callback: Cell<Option<(fn(*mut ()), usize)>>,
}

/// Millisecond counter with a single alarm slot
pub struct SysTickDriver {
    ticks: AtomicU32,
    alarm_taken: AtomicBool,
    alarm: CriticalSectionMutex<Alarm>,
}

impl SysTickDriver {
    const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            alarm_taken: AtomicBool::new(false),
            alarm: CriticalSectionMutex::new(Alarm {
                timestamp: Cell::new(u64::MAX),
                callback: Cell::new(None),
            }),
        }
    }

    /// Advance time and fire the alarm once it is due
    fn tick(&self) {
        let now = self.ticks.fetch_add(1, Ordering::Relaxed) as u64 + 1;

        critical_section::with(|cs| {
            let alarm = self.alarm.borrow(cs);
            if now >= alarm.timestamp.get() {
                alarm.timestamp.set(u64::MAX);
                if let Some((callback, ctx)) = alarm.callback.get() {
                    callback(ctx as *mut ());
                }
            }
        });
    }
}

impl Driver for SysTickDriver {
    fn now(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed) as u64
    }

    unsafe fn allocate_alarm(&self) -> Option<AlarmHandle> {
        if self.alarm_taken.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(AlarmHandle::new(0))
        }
    }

    fn set_alarm_callback(&self, _alarm: AlarmHandle, callback: fn(*mut ()), ctx: *mut ()) {
        critical_section::with(|cs| {
            self.alarm.borrow(cs).callback.set(Some((callback, ctx as usize)));
        });
    }

    fn set_alarm(&self, _alarm: AlarmHandle, timestamp: u64) -> bool {
        critical_section::with(|cs| {
            let alarm = self.alarm.borrow(cs);
            if timestamp <= self.now() {
                alarm.timestamp.set(u64::MAX);
                false
            } else {
                alarm.timestamp.set(timestamp);
                true
            }
        })
    }
}

embassy_time_driver::time_driver_impl!(static DRIVER: SysTickDriver = SysTickDriver::new());

/// Start the 1 kHz SysTick interrupt
pub fn init_systick() {
    unsafe {
        core::ptr::write_volatile(STK_CTLR as *mut u32, 0);
        core::ptr::write_volatile(STK_SR as *mut u32, 0);
        core::ptr::write_volatile(STK_CNTL as *mut u32, 0);
        core::ptr::write_volatile(STK_CMPLR as *mut u32, HCLK_HZ / 1_000 - 1);
        core::ptr::write_volatile(PFIC_IENR0 as *mut u32, 1 << SYSTICK_IRQ);
        core::ptr::write_volatile(STK_CTLR as *mut u32, STK_CTLR_RUN);
    }
}

/// SysTick interrupt handler
#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn SysTick() {
    // Clear CNTIF
    unsafe { core::ptr::write_volatile(STK_SR as *mut u32, 0) };
    DRIVER.tick();
}

// Critical section implementation for single-core RISC-V
#[cfg(target_arch = "riscv32")]
critical_section::set_impl!(RiscvCriticalSection);

#[cfg(target_arch = "riscv32")]
struct RiscvCriticalSection;

#[cfg(target_arch = "riscv32")]
unsafe impl critical_section::Impl for RiscvCriticalSection {
    unsafe fn acquire() -> u8 {
        let mut mstatus: usize;
        core::arch::asm!("csrrci {}, mstatus, 8", out(reg) mstatus);
        (mstatus & 8) as u8
    }

    unsafe fn release(was_active: u8) {
        if was_active != 0 {
            core::arch::asm!("csrsi mstatus, 8");
        }
    }
}
