/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Buffers on the native heap that cross the boundary to the Objective-C
//! runtime.
//!
//! Every call into the runtime that takes or returns something more than a
//! handle goes through one of the adapters in this module:
//! - [NativeStr] turns a host string into a nul-terminated buffer that lives
//!   exactly as long as the call needs it.
//! - [str_from_native] and [str_from_native_owned] turn a (possibly null)
//!   C string back into a host [String].
//! - [NativeArray] wraps the `(basePointer, count)` pair returned by the
//!   runtime's `*_copy*List` functions, copies the elements out and frees the
//!   buffer once.
//! - [NativeRecordArray] and [copy_out_records] do the same for arrays of
//!   small records that point to further strings (property attributes, method
//!   descriptions).
//!
//! Nothing else in the crate should call `malloc` or `free`.
//!
//! Relevant Apple documentation:
//! * [Objective-C Runtime](https://developer.apple.com/documentation/objectivec/objective-c_runtime)
//!   (each `copy` function documents that its result "must be freed with
//!   `free()`")

use std::ffi::{c_char, c_uint, c_void, CStr};

/// A heap that native buffers can be allocated from and released to.
///
/// The runtime allocates its results with `malloc()` and expects callers to
/// `free()` them, so outside of tests this is always [LibcHeap].
///
/// # Safety
/// `alloc` must return a pointer that is valid for writes of `size` bytes,
/// aligned for any pointer-sized type, and that `free` accepts exactly once.
pub unsafe trait NativeHeap {
    /// Allocate `size` bytes. Never returns null: running out of native memory
    /// is fatal.
    fn alloc(&self, size: usize) -> *mut c_void;
    /// Release an allocation made by [NativeHeap::alloc], or a buffer the
    /// runtime handed over to us.
    ///
    /// # Safety
    /// `ptr` must be non-null and not yet released.
    unsafe fn free(&self, ptr: *mut c_void);
}

/// The C library's `malloc`/`free`, shared with the Objective-C runtime.
#[derive(Debug, Default, Copy, Clone)]
pub struct LibcHeap;

unsafe impl NativeHeap for LibcHeap {
    fn alloc(&self, size: usize) -> *mut c_void {
        // malloc(0) may legitimately return null, which we reserve for failure.
        let size = size.max(1);
        let ptr = unsafe { libc::malloc(size) };
        if ptr.is_null() {
            let layout = std::alloc::Layout::from_size_align(size, std::mem::align_of::<usize>())
                .unwrap_or(std::alloc::Layout::new::<usize>());
            std::alloc::handle_alloc_error(layout);
        }
        log_dbg!("Allocated {:?} ({:#x} bytes)", ptr, size);
        ptr
    }

    unsafe fn free(&self, ptr: *mut c_void) {
        assert!(!ptr.is_null());
        log_dbg!("Freed {:?}", ptr);
        libc::free(ptr)
    }
}

/// A nul-terminated copy of a host string on the native heap, released when
/// dropped.
///
/// This is the only way strings are passed into the runtime:
///
/// ```ignore
/// let name = NativeStr::new(name);
/// unsafe { ffi::objc_getClass(name.as_ptr()) }
/// ```
///
/// The buffer is released on every exit path of the enclosing scope,
/// including early returns and unwinding.
pub struct NativeStr<'h, H: NativeHeap + ?Sized = LibcHeap> {
    ptr: *mut c_char,
    heap: &'h H,
}

impl NativeStr<'static> {
    pub fn new(string: &str) -> Self {
        Self::new_in(string, &LibcHeap)
    }
}

impl<'h, H: NativeHeap + ?Sized> NativeStr<'h, H> {
    /// Like [NativeStr::new], but allocating from a specific heap.
    ///
    /// Host strings are assumed not to contain nul bytes. If one does, C would
    /// stop reading there anyway, so the copy is truncated at that point.
    pub fn new_in(string: &str, heap: &'h H) -> Self {
        let bytes = match string.bytes().position(|byte| byte == b'\0') {
            Some(nul_idx) => {
                log!(
                    "Warning: {:?} contains a nul byte, the runtime will only see {:?}",
                    string,
                    &string[..nul_idx]
                );
                &string.as_bytes()[..nul_idx]
            }
            None => string.as_bytes(),
        };

        let ptr: *mut c_char = heap.alloc(bytes.len() + 1).cast();
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.cast::<u8>(), bytes.len());
            ptr.add(bytes.len()).write(0);
        }
        NativeStr { ptr, heap }
    }

    /// Pointer to the nul-terminated buffer. Only valid while `self` lives.
    pub fn as_ptr(&self) -> *const c_char {
        self.ptr
    }

    /// Give up ownership of the buffer. Whoever takes the pointer must release
    /// it to the same heap; [NativeRecordArray] is the only user.
    pub fn into_raw(self) -> *mut c_char {
        let ptr = self.ptr;
        std::mem::forget(self);
        ptr
    }
}

impl<H: NativeHeap + ?Sized> Drop for NativeStr<'_, H> {
    fn drop(&mut self) {
        unsafe { self.heap.free(self.ptr.cast()) }
    }
}

/// Decode a C string that the runtime still owns (`class_getName` etc).
///
/// A null pointer is not a fault: it decodes to the empty string. Bytes that
/// aren't valid UTF-8 are replaced with U+FFFD.
///
/// # Safety
/// `ptr` must be null or point to a nul-terminated string.
pub unsafe fn str_from_native(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Decode a C string that the caller owns (`method_copyReturnType` etc) and
/// release it. Null decodes to the empty string and is not released.
///
/// # Safety
/// `ptr` must be null or a nul-terminated string allocated from `heap` that
/// nothing else will release.
pub unsafe fn str_from_native_owned<H: NativeHeap + ?Sized>(ptr: *mut c_char, heap: &H) -> String {
    let string = str_from_native(ptr);
    if !ptr.is_null() {
        heap.free(ptr.cast());
    }
    string
}

/// A `(basePointer, count)` array handed over by the runtime.
///
/// Elements are read with a stride of `size_of::<T>()`, so for handle types
/// this is the platform's real pointer width. The buffer is released once,
/// when this is dropped, which is always after the elements were copied out.
///
/// The count is authoritative: a zero count gives an empty array whether or
/// not the base pointer is null, and a non-null base pointer is released
/// either way.
pub struct NativeArray<'h, T: Copy, H: NativeHeap + ?Sized = LibcHeap> {
    base: *mut T,
    count: usize,
    heap: &'h H,
}

impl<T: Copy> NativeArray<'static, T> {
    /// # Safety
    /// See [NativeArray::from_raw_parts_in].
    pub unsafe fn from_raw_parts(base: *mut T, count: c_uint) -> Self {
        Self::from_raw_parts_in(base, count, &LibcHeap)
    }
}

impl<'h, T: Copy, H: NativeHeap + ?Sized> NativeArray<'h, T, H> {
    /// Take ownership of a runtime array.
    ///
    /// # Safety
    /// `base` must be null or a buffer from `heap` holding at least `count`
    /// initialized elements, and nothing else may release it.
    pub unsafe fn from_raw_parts_in(base: *mut T, count: c_uint, heap: &'h H) -> Self {
        let count = count as usize;
        assert!(
            count == 0 || !base.is_null(),
            "Null array claiming {} elements",
            count
        );
        NativeArray { base, count, heap }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        if index < self.count {
            Some(unsafe { self.base.add(index).read() })
        } else {
            None
        }
    }

    /// Copies of the elements, in native order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.count).map(move |i| unsafe { self.base.add(i).read() })
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Copy, H: NativeHeap + ?Sized> Drop for NativeArray<'_, T, H> {
    fn drop(&mut self) {
        if !self.base.is_null() {
            unsafe { self.heap.free(self.base.cast()) }
        }
    }
}

/// Copy out and release a runtime array in one go. This is what almost every
/// `*_copy*List` wrapper wants.
///
/// # Safety
/// See [NativeArray::from_raw_parts_in].
pub unsafe fn copy_out<T: Copy>(base: *mut T, count: c_uint) -> Vec<T> {
    NativeArray::from_raw_parts(base, count).to_vec()
}

/// A C struct that appears in runtime arrays and points to further native
/// strings, e.g. `objc_property_attribute_t`.
///
/// # Safety
/// [NativeRecord::for_each_nested] must report every string pointer the
/// record holds, each exactly once.
pub unsafe trait NativeRecord: Copy {
    /// The owned host-side value this record is copied into.
    type Host;

    /// Copy the record, including the strings it points to, into host memory.
    ///
    /// # Safety
    /// The nested pointers must be null or valid C strings.
    unsafe fn to_host(&self) -> Self::Host;

    /// Call `f` with each nested string pointer (possibly null).
    fn for_each_nested(&self, f: &mut dyn FnMut(*mut c_char));
}

/// A [NativeRecord] that host code can build to pass into the runtime.
pub trait BuildNativeRecord: NativeRecord {
    /// Encode `host`, allocating fresh nested strings from `heap`.
    fn from_host_in<H: NativeHeap + ?Sized>(host: &Self::Host, heap: &H) -> Self;
}

/// Who owns the strings nested in the records of a runtime result array.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NestedStrings {
    /// Each nested string is its own allocation that the caller must release
    /// after the record was copied.
    Owned,
    /// The nested strings live inside the outer buffer or belong to the
    /// runtime. Releasing the outer array is all that's needed.
    Borrowed,
}

/// Copy out and release a runtime array of records.
///
/// Every record is copied into its host value first. Then, for
/// [NestedStrings::Owned], every nested string of every record is released,
/// and finally the outer buffer is.
///
/// # Safety
/// As for [NativeArray::from_raw_parts_in], plus `nested` must match the
/// runtime's ownership contract for the function that produced the array.
pub unsafe fn copy_out_records_in<R: NativeRecord, H: NativeHeap + ?Sized>(
    base: *mut R,
    count: c_uint,
    nested: NestedStrings,
    heap: &H,
) -> Vec<R::Host> {
    let array = NativeArray::from_raw_parts_in(base, count, heap);
    let hosts = array.iter().map(|record| record.to_host()).collect();
    if nested == NestedStrings::Owned {
        for record in array.iter() {
            record.for_each_nested(&mut |ptr| {
                if !ptr.is_null() {
                    heap.free(ptr.cast())
                }
            });
        }
    }
    hosts
}

/// [copy_out_records_in] for arrays from the runtime's own heap.
///
/// # Safety
/// See [copy_out_records_in].
pub unsafe fn copy_out_records<R: NativeRecord>(
    base: *mut R,
    count: c_uint,
    nested: NestedStrings,
) -> Vec<R::Host> {
    copy_out_records_in(base, count, nested, &LibcHeap)
}

/// A host-built array of records to pass into the runtime, e.g. the attribute
/// list for `class_addProperty`.
///
/// The records live in one buffer of `count * size_of::<R>()` bytes and each
/// one points to its own freshly encoded strings. When dropped, every nested
/// string of every record is released, then the buffer itself.
///
/// An empty list is a null pointer with no allocation behind it.
pub struct NativeRecordArray<'h, R: NativeRecord, H: NativeHeap + ?Sized = LibcHeap> {
    base: *mut R,
    /// Number of initialized records. While filling, this lags behind the
    /// allocation so that `Drop` only looks at records that exist.
    count: usize,
    heap: &'h H,
}

impl<R: BuildNativeRecord> NativeRecordArray<'static, R> {
    pub fn new(hosts: &[R::Host]) -> Self {
        Self::new_in(hosts, &LibcHeap)
    }
}

impl<'h, R: BuildNativeRecord, H: NativeHeap + ?Sized> NativeRecordArray<'h, R, H> {
    pub fn new_in(hosts: &[R::Host], heap: &'h H) -> Self {
        let mut array = NativeRecordArray {
            base: std::ptr::null_mut(),
            count: 0,
            heap,
        };
        if hosts.is_empty() {
            return array;
        }

        let size = hosts.len().checked_mul(std::mem::size_of::<R>()).unwrap();
        array.base = heap.alloc(size).cast();
        for host in hosts {
            let record = R::from_host_in(host, heap);
            unsafe { array.base.add(array.count).write(record) };
            array.count += 1;
        }
        array
    }
}

impl<R: NativeRecord, H: NativeHeap + ?Sized> NativeRecordArray<'_, R, H> {
    /// Pointer to the first record, or null for an empty list.
    pub fn as_ptr(&self) -> *const R {
        self.base
    }

    /// The record count, typed the way the runtime wants it.
    pub fn count(&self) -> c_uint {
        self.count.try_into().unwrap()
    }
}

impl<R: NativeRecord, H: NativeHeap + ?Sized> Drop for NativeRecordArray<'_, R, H> {
    fn drop(&mut self) {
        for i in 0..self.count {
            let record = unsafe { self.base.add(i).read() };
            record.for_each_nested(&mut |ptr| {
                if !ptr.is_null() {
                    unsafe { self.heap.free(ptr.cast()) }
                }
            });
        }
        if !self.base.is_null() {
            unsafe { self.heap.free(self.base.cast()) }
        }
    }
}
